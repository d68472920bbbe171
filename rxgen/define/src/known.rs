//! Fixed library and marker types.
//!
//! The generator never compares qualified names as strings at validation
//! sites. Instead every class reference is tagged with a [`KnownType`] (when
//! it names one of the fixed library types) at the moment it is constructed,
//! and checks match on the tag.
//!
//! ## Examples
//!
//! ```
//! use std::str::FromStr;
//! use rxgen_define::KnownType;
//!
//! let known = KnownType::from_str("rxhttp.wrapper.param.FormParam").unwrap();
//! assert_eq!(known, KnownType::FormParam);
//! assert_eq!(known.marker(), Some(KnownType::ParamMarker));
//! ```

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A library type the generator has fixed knowledge about.
///
/// The string form of each variant is the type's fully qualified name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum KnownType {
    /// Marker interface every parameter builder must reach.
    #[strum(serialize = "rxhttp.wrapper.param.Param")]
    ParamMarker,
    /// Marker interface every parser must reach.
    #[strum(serialize = "rxhttp.wrapper.parse.Parser")]
    ParserMarker,
    /// Marker interface every converter must reach.
    #[strum(serialize = "rxhttp.wrapper.callback.IConverter")]
    ConverterMarker,
    /// The only accepted type for client-provider fields.
    #[strum(serialize = "okhttp3.OkHttpClient")]
    OkHttpClient,
    /// Parameter type of a parser's `onParse` method.
    #[strum(serialize = "okhttp3.Response")]
    Response,
    #[strum(serialize = "java.lang.String")]
    String,
    #[strum(serialize = "java.lang.Object")]
    Object,
    /// Reflective type token.
    #[strum(serialize = "java.lang.reflect.Type")]
    ReflectType,
    /// Class token (`Class<T>`).
    #[strum(serialize = "java.lang.Class")]
    Class,
    #[strum(serialize = "java.util.List")]
    List,
    #[strum(serialize = "rxhttp.wrapper.param.AbstractParam")]
    AbstractParam,
    #[strum(serialize = "rxhttp.wrapper.param.AbstractBodyParam")]
    AbstractBodyParam,
    #[strum(serialize = "rxhttp.wrapper.param.BodyParam")]
    BodyParam,
    #[strum(serialize = "rxhttp.wrapper.param.FormParam")]
    FormParam,
    #[strum(serialize = "rxhttp.wrapper.param.JsonParam")]
    JsonParam,
    #[strum(serialize = "rxhttp.wrapper.param.JsonArrayParam")]
    JsonArrayParam,
    #[strum(serialize = "rxhttp.wrapper.param.NoBodyParam")]
    NoBodyParam,
    #[strum(serialize = "rxhttp.wrapper.parse.AbstractParser")]
    AbstractParser,
    #[strum(serialize = "rxhttp.wrapper.parse.SimpleParser")]
    SimpleParser,
    #[strum(serialize = "rxhttp.wrapper.parse.TypeParser")]
    TypeParser,
    #[strum(serialize = "rxhttp.wrapper.callback.JsonConverter")]
    JsonConverter,
}

impl KnownType {
    /// Resolves a qualified name against the table.
    pub fn resolve(qualified_name: &str) -> Option<Self> {
        qualified_name.parse().ok()
    }

    /// Returns the fully qualified name of this type.
    pub fn qualified_name(&self) -> &'static str {
        (*self).into()
    }

    /// Returns the marker interface this library type is known to reach.
    ///
    /// Markers reach themselves. Plain JDK types reach nothing.
    pub fn marker(&self) -> Option<KnownType> {
        match self {
            Self::ParamMarker
            | Self::AbstractParam
            | Self::AbstractBodyParam
            | Self::BodyParam
            | Self::FormParam
            | Self::JsonParam
            | Self::JsonArrayParam
            | Self::NoBodyParam => Some(Self::ParamMarker),
            Self::ParserMarker | Self::AbstractParser | Self::SimpleParser | Self::TypeParser => {
                Some(Self::ParserMarker)
            }
            Self::ConverterMarker | Self::JsonConverter => Some(Self::ConverterMarker),
            _ => None,
        }
    }

    /// Returns true when this type is, or is known to inherit from, `marker`.
    pub fn reaches(&self, marker: KnownType) -> bool {
        self.marker() == Some(marker)
    }

    /// Returns true for the three marker interfaces.
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            Self::ParamMarker | Self::ParserMarker | Self::ConverterMarker
        )
    }
}

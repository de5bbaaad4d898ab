//! This module defines the canonical, type-safe representation of the GMT
//! data-container vocabulary: families, vias, geometries and creation modes.

use std::fmt;
use std::str::FromStr;

use crate::error::GmtError;

/// Defines an enum whose variants map one-to-one onto libgmt constant names.
///
/// Each generated type gets `ALL`, `constant_name()`, `names()`, `FromStr`
/// (exact, case-sensitive match on the constant name) and `Display`.
macro_rules! gmt_constant_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($what:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $constant:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The name of the libgmt constant this variant stands for.
            pub fn constant_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $constant),+
                }
            }

            /// All accepted constant names, in declaration order.
            pub fn names() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.constant_name()).collect()
            }
        }

        impl FromStr for $name {
            type Err = GmtError;

            fn from_str(s: &str) -> Result<Self, GmtError> {
                match s {
                    $($constant => Ok($name::$variant),)+
                    _ => Err(GmtError::clib(format!(concat!("Invalid ", $what, " '{}'."), s))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.constant_name())
            }
        }
    };
}

gmt_constant_enum! {
    /// The kind of container `GMT_Create_Data` allocates.
    pub enum DataFamily ("data family") {
        Dataset => "GMT_IS_DATASET",
        Grid => "GMT_IS_GRID",
        Palette => "GMT_IS_PALETTE",
        Matrix => "GMT_IS_MATRIX",
        Vector => "GMT_IS_VECTOR",
    }
}

gmt_constant_enum! {
    /// How user data reaches a family: through a matrix or through vectors.
    pub enum DataVia ("data family (via)") {
        Matrix => "GMT_VIA_MATRIX",
        Vector => "GMT_VIA_VECTOR",
    }
}

gmt_constant_enum! {
    /// The geometry of the data held in a container.
    pub enum DataGeometry ("data geometry") {
        None => "GMT_IS_NONE",
        Point => "GMT_IS_POINT",
        Line => "GMT_IS_LINE",
        Polygon => "GMT_IS_POLYGON",
        /// Points, lines or polygons.
        Plp => "GMT_IS_PLP",
        Surface => "GMT_IS_SURFACE",
    }
}

gmt_constant_enum! {
    /// What `GMT_Create_Data` should allocate besides the container header.
    pub enum DataMode ("data creation mode") {
        ContainerOnly => "GMT_CONTAINER_ONLY",
        Output => "GMT_OUTPUT",
    }
}

/// A data family with an optional via, written `"FAMILY"` or `"FAMILY|VIA"`.
///
/// libgmt expects the integer sum of both constants, so the via is kept
/// alongside the family rather than folded into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FamilySpec {
    pub family: DataFamily,
    pub via: Option<DataVia>,
}

impl FamilySpec {
    pub fn new(family: DataFamily, via: Option<DataVia>) -> Self {
        Self { family, via }
    }
}

impl From<DataFamily> for FamilySpec {
    fn from(family: DataFamily) -> Self {
        Self { family, via: None }
    }
}

impl FromStr for FamilySpec {
    type Err = GmtError;

    fn from_str(s: &str) -> Result<Self, GmtError> {
        let parts: Vec<&str> = s.split('|').collect();
        if parts.len() > 2 {
            return Err(GmtError::clib(format!(
                "Too many sections in family (>2): '{}'",
                s
            )));
        }
        let family = parts[0].parse::<DataFamily>()?;
        let via = match parts.get(1) {
            Some(via_name) => Some(via_name.parse::<DataVia>()?),
            None => None,
        };
        Ok(Self { family, via })
    }
}

impl fmt::Display for FamilySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.via {
            Some(via) => write!(f, "{}|{}", self.family, via),
            None => write!(f, "{}", self.family),
        }
    }
}

// Numeric type catalog: the concrete kinds, their representable limits, and
// per-call uniform-at-random resolution through the draw source.
//
// bfloat16 is the odd one out: it draws with single-precision semantics but
// reports its own, narrower limits.

use crate::data::{DrawError, DrawSource};
use crate::width::FloatWidth;
use half::{bf16, f16};

/// Request category for domain resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Integer,
    Float,
}

/// Supported floating-point kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    Float16,
    BFloat16,
    Float32,
    Float64,
}

impl FloatKind {
    pub const ALL: [FloatKind; 4] = [
        FloatKind::Float16,
        FloatKind::BFloat16,
        FloatKind::Float32,
        FloatKind::Float64,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FloatKind::Float16 => "float16",
            FloatKind::BFloat16 => "bfloat16",
            FloatKind::Float32 => "float32",
            FloatKind::Float64 => "float64",
        }
    }

    /// Storage width in bits.
    pub fn bits(self) -> u32 {
        match self {
            FloatKind::Float16 | FloatKind::BFloat16 => 16,
            FloatKind::Float32 => 32,
            FloatKind::Float64 => 64,
        }
    }

    /// Width used for drawing.
    pub fn draw_width(self) -> FloatWidth {
        match self {
            FloatKind::Float16 => FloatWidth::Width16,
            FloatKind::BFloat16 | FloatKind::Float32 => FloatWidth::Width32,
            FloatKind::Float64 => FloatWidth::Width64,
        }
    }

    pub fn domain(self) -> FloatDomain {
        let (max_value, smallest_normal) = match self {
            FloatKind::Float16 => (f16::MAX.to_f64(), f16::MIN_POSITIVE.to_f64()),
            FloatKind::BFloat16 => (bf16::MAX.to_f64(), bf16::MIN_POSITIVE.to_f64()),
            FloatKind::Float32 => (f64::from(f32::MAX), f64::from(f32::MIN_POSITIVE)),
            FloatKind::Float64 => (f64::MAX, f64::MIN_POSITIVE),
        };
        FloatDomain {
            kind: self,
            width: self.draw_width(),
            min_value: -max_value,
            max_value,
            smallest_normal,
        }
    }
}

/// Representable range of one concrete floating-point type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatDomain {
    pub kind: FloatKind,
    /// Draw width; coarser than `kind.bits()` for bfloat16.
    pub width: FloatWidth,
    pub min_value: f64,
    pub max_value: f64,
    /// Smallest positive normal magnitude of the kind itself.
    pub smallest_normal: f64,
}

impl FloatDomain {
    /// Resolve a float domain uniformly at random among the supported kinds.
    pub fn resolve<S: DrawSource>(source: &mut S) -> Result<FloatDomain, DrawError> {
        let kind = FloatKind::ALL[source.choose(FloatKind::ALL.len())?];
        log::trace!("resolved float domain {}", kind.name());
        Ok(kind.domain())
    }
}

/// Supported integer kinds, signed and unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntKind {
    pub const ALL: [IntKind; 8] = [
        IntKind::I8,
        IntKind::I16,
        IntKind::I32,
        IntKind::I64,
        IntKind::U8,
        IntKind::U16,
        IntKind::U32,
        IntKind::U64,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IntKind::I8 => "int8",
            IntKind::I16 => "int16",
            IntKind::I32 => "int32",
            IntKind::I64 => "int64",
            IntKind::U8 => "uint8",
            IntKind::U16 => "uint16",
            IntKind::U32 => "uint32",
            IntKind::U64 => "uint64",
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            IntKind::I8 | IntKind::U8 => 8,
            IntKind::I16 | IntKind::U16 => 16,
            IntKind::I32 | IntKind::U32 => 32,
            IntKind::I64 | IntKind::U64 => 64,
        }
    }

    pub fn domain(self) -> IntDomain {
        let (min_value, max_value) = match self {
            IntKind::I8 => (i128::from(i8::MIN), i128::from(i8::MAX)),
            IntKind::I16 => (i128::from(i16::MIN), i128::from(i16::MAX)),
            IntKind::I32 => (i128::from(i32::MIN), i128::from(i32::MAX)),
            IntKind::I64 => (i128::from(i64::MIN), i128::from(i64::MAX)),
            IntKind::U8 => (0, i128::from(u8::MAX)),
            IntKind::U16 => (0, i128::from(u16::MAX)),
            IntKind::U32 => (0, i128::from(u32::MAX)),
            IntKind::U64 => (0, i128::from(u64::MAX)),
        };
        IntDomain {
            kind: self,
            bits: self.bits(),
            min_value,
            max_value,
        }
    }
}

/// Representable range of one concrete integer type. `i128` working values
/// cover the full span of every kind, uint64 included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntDomain {
    pub kind: IntKind,
    pub bits: u32,
    pub min_value: i128,
    pub max_value: i128,
}

impl IntDomain {
    /// Resolve an integer domain uniformly at random among the supported kinds.
    pub fn resolve<S: DrawSource>(source: &mut S) -> Result<IntDomain, DrawError> {
        let kind = IntKind::ALL[source.choose(IntKind::ALL.len())?];
        log::trace!("resolved integer domain {}", kind.name());
        Ok(kind.domain())
    }
}

/// A resolved domain of either category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericDomain {
    Int(IntDomain),
    Float(FloatDomain),
}

impl NumericDomain {
    /// Resolve a domain for the requested category.
    pub fn resolve<S: DrawSource>(
        source: &mut S,
        category: Category,
    ) -> Result<NumericDomain, DrawError> {
        match category {
            Category::Integer => IntDomain::resolve(source).map(NumericDomain::Int),
            Category::Float => FloatDomain::resolve(source).map(NumericDomain::Float),
        }
    }
}

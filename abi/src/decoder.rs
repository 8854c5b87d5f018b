//! Reading named values back from an executor's flat witness column.

use std::ops::Range;

use crate::{AbiParameter, Scalar};

/// Positional reader over the flat witness column an executor returns.
///
/// Offsets are derived from the same declared parameter order the encoder
/// walks, so reads are the exact inverse of encoding for scalar and
/// array-of-scalar shapes. Reconstructing structured values is out of scope;
/// callers get the contiguous leaf slice and interpret it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder<'a> {
    parameters: &'a [AbiParameter],
    column: &'a [Scalar],
    base: usize,
}

impl<'a> Decoder<'a> {
    /// Create a decoder with witness indices starting at zero.
    pub const fn new(
        parameters: &'a [AbiParameter],
        column: &'a [Scalar],
    ) -> Self {
        Self::with_base(parameters, column, 0)
    }

    /// Create a decoder with witness indices starting at `base`, symmetric
    /// with an encoder over the same base.
    pub const fn with_base(
        parameters: &'a [AbiParameter],
        column: &'a [Scalar],
        base: usize,
    ) -> Self {
        Self {
            parameters,
            column,
            base,
        }
    }

    /// Full witness column under inspection.
    pub const fn column(&self) -> &'a [Scalar] {
        self.column
    }

    /// Witness index range assigned to a named parameter.
    pub fn range(&self, name: &str) -> Option<Range<usize>> {
        let mut offset = self.base;

        for parameter in self.parameters {
            let leaves = parameter.leaves();

            if parameter.name == name {
                return Some(offset..offset + leaves);
            }

            offset += leaves;
        }

        None
    }

    /// Starting witness index of a named parameter.
    pub fn offset(&self, name: &str) -> Option<usize> {
        self.range(name).map(|range| range.start)
    }

    /// Value of a single-leaf parameter.
    ///
    /// Returns `None` when the parameter is undeclared, spans more than one
    /// leaf, or lies beyond the column.
    ///
    /// # Example
    ///
    /// ```
    /// use circuit_abi::{AbiParameter, AbiType, Decoder, Scalar};
    ///
    /// let parameters = vec![AbiParameter {
    ///     name: "result".into(),
    ///     ty: AbiType::Field,
    ///     visibility: None,
    /// }];
    ///
    /// let column = vec![Scalar::from(6)];
    /// let decoder = Decoder::new(&parameters, &column);
    ///
    /// assert_eq!(
    ///     decoder.scalar("result").map(|s| s.as_str()),
    ///     Some("0x6")
    /// );
    /// ```
    pub fn scalar(&self, name: &str) -> Option<&'a Scalar> {
        let range = self.range(name)?;

        if range.len() != 1 {
            return None;
        }

        self.column.get(range.start)
    }

    /// Contiguous leaf values of a named parameter.
    ///
    /// Returns `None` when the parameter is undeclared or the column is too
    /// short to cover its full range.
    pub fn leaves(&self, name: &str) -> Option<&'a [Scalar]> {
        let range = self.range(name)?;

        self.column.get(range)
    }
}

#[test]
fn base_shifts_every_read() {
    use crate::AbiType;

    let parameters = vec![
        AbiParameter {
            name: "a".into(),
            ty: AbiType::Field,
            visibility: None,
        },
        AbiParameter {
            name: "pair".into(),
            ty: AbiType::Array {
                length: 2,
                element: Box::new(AbiType::Field),
            },
            visibility: None,
        },
    ];

    let column: Vec<Scalar> = (0..5).map(Scalar::from).collect();

    let decoder = Decoder::with_base(&parameters, &column, 2);

    assert_eq!(decoder.offset("a"), Some(2));
    assert_eq!(decoder.range("pair"), Some(3..5));
    assert_eq!(decoder.scalar("a").map(|s| s.as_str()), Some("0x2"));
    assert_eq!(
        decoder.leaves("pair").map(<[Scalar]>::len),
        Some(2)
    );

    // multi-leaf parameters have no single scalar
    assert_eq!(decoder.scalar("pair"), None);

    assert_eq!(decoder.offset("missing"), None);
}

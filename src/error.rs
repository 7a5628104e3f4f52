// SPDX-License-Identifier: GPL-3.0-or-later
use thiserror::Error;

/// Errors raised by the frame pipeline.
///
/// None of these are transient. They all point at a caller handing the pipeline data that
/// doesn't match how it was configured, so nothing in the pipeline retries on them.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PipelineError {
    /// A grid handed to the pipeline does not have the configured dimensions.
    #[error(
        "input grid is {}x{}, expected {}x{}",
        .actual.0,
        .actual.1,
        .expected.0,
        .expected.1
    )]
    InputShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// The cell color grid given to the bitmap encoder disagrees with the configured grid axis.
    #[error(
        "cell grid has {} rows and {} columns, expected {} rows and {} columns",
        .actual.0,
        .actual.1,
        .expected.0,
        .expected.1
    )]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A component was constructed with settings it cannot work with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    pub(crate) fn input_shape(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::InputShape { expected, actual }
    }
}

#[cfg(test)]
mod test {
    use super::PipelineError;

    #[test]
    fn input_shape_message() {
        let err = PipelineError::input_shape((8, 8), (8, 7));
        assert_eq!(err.to_string(), "input grid is 8x7, expected 8x8");
    }

    #[test]
    fn shape_mismatch_message() {
        let err = PipelineError::ShapeMismatch {
            expected: (15, 15),
            actual: (15, 14),
        };
        assert_eq!(
            err.to_string(),
            "cell grid has 15 rows and 14 columns, expected 15 rows and 15 columns"
        );
    }
}

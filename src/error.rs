use thiserror::Error;

/// RingBuffer の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    /// 容量 0 での生成・リサイズ
    #[error("Invalid size: {size} (must be greater than 0)")]
    InvalidArgument { size: usize },

    /// スロット番号が [0, capacity) の範囲外
    #[error("Index {index} out of range (capacity {capacity})")]
    IndexOutOfRange { index: usize, capacity: usize },
}

impl RingError {
    /// セッション応答で使う機械可読なエラー種別
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            RingError::InvalidArgument { size: 0 }.to_string(),
            "Invalid size: 0 (must be greater than 0)"
        );
        assert_eq!(
            RingError::IndexOutOfRange {
                index: 9,
                capacity: 4
            }
            .to_string(),
            "Index 9 out of range (capacity 4)"
        );
    }
}

use std::io::{self, BufRead, Write};

use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::error::RingError;
use crate::ring_buffer::RingBuffer;

/// セッションで扱える容量の上限（スロットは起動時に確保するため）
pub const MAX_CAPACITY: usize = 1 << 16;

/// セッション層のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Ring(#[from] RingError),

    /// MAX_CAPACITY を超える容量指定
    #[error("Size {size} exceeds limit {max}")]
    TooLarge { size: usize, max: usize },
}

impl SessionError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ring(e) => e.kind(),
            Self::TooLarge { .. } => "invalid_argument",
        }
    }
}

fn check_size(size: usize) -> Result<(), SessionError> {
    if size > MAX_CAPACITY {
        return Err(SessionError::TooLarge {
            size,
            max: MAX_CAPACITY,
        });
    }
    Ok(())
}

/// 1 行 1 JSON のコマンド
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Add {
        #[serde(default)]
        value: Value,
    },
    Get {
        index: usize,
    },
    GetAll,
    Resize {
        size: usize,
    },
    Stats,
}

/// バッファの状態（stats 応答）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub capacity: usize,
    pub current_amount: usize,
    pub head: usize,
}

impl<T> From<&RingBuffer<T>> for Snapshot {
    fn from(buf: &RingBuffer<T>) -> Self {
        Self {
            capacity: buf.capacity(),
            current_amount: buf.current_amount(),
            head: buf.head(),
        }
    }
}

/// JSON 値を保持する RingBuffer をコマンドで操作するセッション
pub struct Session {
    buffer: RingBuffer<Value>,
}

impl Session {
    pub fn new(capacity: usize) -> Result<Self, SessionError> {
        check_size(capacity)?;
        Ok(Self {
            buffer: RingBuffer::new(capacity)?,
        })
    }

    pub fn buffer(&self) -> &RingBuffer<Value> {
        &self.buffer
    }

    pub fn execute(&mut self, req: Request) -> Result<Value, SessionError> {
        match req {
            Request::Add { value } => {
                self.buffer.add(value);
                Ok(json!({ "ok": true }))
            }
            Request::Get { index } => {
                let value = self.buffer.get(index)?;
                Ok(json!({ "ok": true, "value": value }))
            }
            Request::GetAll => {
                let values: Vec<&Value> = self.buffer.get_all().collect();
                Ok(json!({ "ok": true, "values": values }))
            }
            Request::Resize { size } => {
                check_size(size)?;
                self.buffer.resize(size)?;
                Ok(json!({ "ok": true }))
            }
            Request::Stats => {
                let snap = Snapshot::from(&self.buffer);
                Ok(json!({
                    "ok": true,
                    "capacity": snap.capacity,
                    "current_amount": snap.current_amount,
                    "head": snap.head,
                }))
            }
        }
    }

    /// 1 行を処理して応答を返す。空行は None
    pub fn handle_line(&mut self, line: &str) -> Option<Value> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let req: Request = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!("Rejected command: {e}");
                return Some(error_response("bad_request", &e.to_string()));
            }
        };

        Some(match self.execute(req) {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("Command failed: {e}");
                error_response(e.kind(), &e.to_string())
            }
        })
    }

    /// EOF まで読み、応答を 1 行ずつ書き出す。処理したコマンド数を返す
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> io::Result<usize> {
        let mut handled = 0;
        for line in reader.lines() {
            let line = line?;
            if let Some(resp) = self.handle_line(&line) {
                writeln!(writer, "{resp}")?;
                writer.flush()?;
                handled += 1;
            }
        }
        tracing::debug!("Session ended after {handled} commands");
        Ok(handled)
    }
}

fn error_response(kind: &str, message: &str) -> Value {
    json!({ "ok": false, "error": kind, "message": message })
}

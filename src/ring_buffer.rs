use crate::error::RingError;

/// 固定容量のリングバッファ（満杯時は最も古い要素を上書き）
///
/// `get` / `get_all` は時系列順ではなく *物理* スロットを返す。
/// 一周した後はスロット 0 が最古の要素とは限らない。
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buf: Vec<T>,
    head: usize,
    count: usize,
}

impl<T: Default> RingBuffer<T> {
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        if capacity == 0 {
            return Err(RingError::InvalidArgument { size: capacity });
        }
        Ok(Self {
            buf: alloc_slots(capacity),
            head: 0,
            count: 0,
        })
    }

    /// 値を書き込む。満杯なら最も古い要素を上書きする
    pub fn add(&mut self, value: T) {
        let cap = self.buf.len();
        self.buf[self.head] = value;
        self.head = (self.head + 1) % cap;
        self.set_count(self.count + 1);
        tracing::trace!(head = self.head, count = self.count, "ring add");
    }

    /// 物理スロット `index` の値を返す
    ///
    /// 未書き込みのスロットは `T::default()` のまま。
    pub fn get(&self, index: usize) -> Result<&T, RingError> {
        self.buf.get(index).ok_or(RingError::IndexOutOfRange {
            index,
            capacity: self.buf.len(),
        })
    }

    /// 先頭から `current_amount()` 個のスロットを格納順に返す
    ///
    /// 時系列順になるのは一周する前か、リサイズ直後（最古の要素がスロット 0 に詰められる）のみ。
    pub fn get_all(&self) -> impl Iterator<Item = &T> + Clone + '_ {
        self.buf[..self.count].iter()
    }

    /// 容量を変更する。時系列順を保ったまま、溢れる分は古い順に捨てる
    pub fn resize(&mut self, new_size: usize) -> Result<(), RingError> {
        if new_size == 0 {
            return Err(RingError::InvalidArgument { size: new_size });
        }
        let cap = self.buf.len();
        if new_size == cap {
            return Ok(());
        }

        let start = if new_size < cap && self.count > new_size {
            // 縮小で収まらない: 古い (count - new_size) 件を読み飛ばす
            (self.head + (self.count - new_size)) % self.count
        } else if new_size > cap && self.is_full() {
            // 満杯なら head が最も古い要素の位置
            self.head
        } else {
            0
        };

        let kept = self.count.min(new_size);
        let mut old = std::mem::replace(&mut self.buf, alloc_slots(new_size));
        for (i, slot) in self.buf.iter_mut().take(kept).enumerate() {
            *slot = std::mem::take(&mut old[(start + i) % cap]);
        }

        tracing::debug!(
            from = cap,
            to = new_size,
            start,
            kept,
            dropped = self.count - kept,
            "ring resize"
        );

        // kept == new_size なら満杯: 次の add はスロット 0 (最古) を上書き
        self.head = if kept == new_size { 0 } else { kept };
        self.set_count(kept);
        Ok(())
    }
}

impl<T> RingBuffer<T> {
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn current_amount(&self) -> usize {
        self.count
    }

    /// 次の `add` が書き込むスロット
    pub fn head(&self) -> usize {
        self.head
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.buf.len()
    }

    // count の唯一の更新経路。容量を超えない
    fn set_count(&mut self, count: usize) {
        self.count = count.min(self.buf.len());
    }
}

fn alloc_slots<T: Default>(n: usize) -> Vec<T> {
    std::iter::repeat_with(T::default).take(n).collect()
}

use super::types::{
    HitTag, MissTag, ReqId, BANK_GROUP_WIDTH, BANK_WIDTH, COLUMN_WIDTH, ROW_WIDTH,
};

/// A single read request addressed by (bank group, bank, row, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest {
    pub group: u8,
    pub bank: u8,
    pub row: u32,
    pub col: u16,
}

impl ReadRequest {
    /// Builds a request with every field masked to its bus width.
    pub fn new(group: u8, bank: u8, row: u32, col: u16) -> Self {
        Self {
            group: group & ((1u8 << BANK_GROUP_WIDTH) - 1),
            bank: bank & ((1u8 << BANK_WIDTH) - 1),
            row: row & ((1u32 << ROW_WIDTH) - 1),
            col: col & ((1u16 << COLUMN_WIDTH) - 1),
        }
    }

    pub fn hit_tag(&self) -> HitTag {
        HitTag {
            group: self.group,
            bank: self.bank,
            row: self.row,
        }
    }

    pub fn miss_tag(&self) -> MissTag {
        MissTag {
            group: self.group,
            bank: self.bank,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct BufferSlot {
    req: ReadRequest,
    // next request in the same-row chain, in ingest order
    chain_next: Option<ReqId>,
}

/// Bounded append-only store of accepted requests. The slot index is the
/// request id; entries persist across batches until an explicit `clear`.
#[derive(Debug)]
pub struct RequestBuffer {
    slots: Vec<BufferSlot>,
    capacity: usize,
}

impl RequestBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Appends a request, returning false when the buffer is full. Previously
    /// accepted entries are never disturbed by a refused append.
    pub fn try_push(&mut self, req: ReadRequest) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots.push(BufferSlot {
            req,
            chain_next: None,
        });
        true
    }

    pub fn get(&self, id: ReqId) -> &ReadRequest {
        &self.slots[id].req
    }

    pub fn chain_next(&self, id: ReqId) -> Option<ReqId> {
        self.slots[id].chain_next
    }

    /// Links `id` to `next` inside one same-row chain.
    pub fn chain_set(&mut self, id: ReqId, next: ReqId) {
        self.slots[id].chain_next = Some(next);
    }

    /// Lowest request id whose hit tag matches, if any.
    pub fn lookup(&self, tag: HitTag) -> Option<ReqId> {
        self.slots.iter().position(|slot| slot.req.hit_tag() == tag)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Drops the chain pointers while keeping the stored requests, so a new
    /// batch pass can relink them.
    pub fn reset_chains(&mut self) {
        for slot in &mut self.slots {
            slot.chain_next = None;
        }
    }
}

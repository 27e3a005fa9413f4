//! LZ code table used by the decoder.
//!
//! Strings are stored as prefix chains: each entry records the code of its
//! prefix, its own last byte, its first byte and its length. Right after a
//! code is decoded the table gains an *incomplete* entry whose last byte is
//! only known once the next code arrives.

use crate::header::StreamHeader;

const NO_PREFIX: u32 = u32::MAX;

#[derive(Debug, Clone, Copy)]
struct Entry {
    prefix: u32,
    byte: u8,
    first: u8,
    len: u32,
}

/// Decoder-side code table.
#[derive(Debug, Default)]
pub struct CodeTable {
    entries: Vec<Entry>,
    /// Initial table length (literals plus the CLEAR slot).
    initial_len: usize,
    /// Index of the entry still waiting for its last byte.
    pending: Option<usize>,
}

impl CodeTable {
    /// Rebuild the initial table from a stream header.
    pub fn init(&mut self, header: &StreamHeader<'_>) {
        let alphabet = header.alphabet_len();

        self.entries.clear();
        self.entries.reserve(alphabet + 1);
        for code in 0..alphabet {
            let byte = header.literal(code);
            self.entries.push(Entry {
                prefix: NO_PREFIX,
                byte,
                first: byte,
                len: 1,
            });
        }

        // CLEAR slot; never looked up as a string
        self.entries.push(Entry {
            prefix: NO_PREFIX,
            byte: 0,
            first: 0,
            len: 0,
        });

        self.initial_len = self.entries.len();
        self.pending = None;
    }

    /// Drop every learned entry (CLEAR code).
    pub fn restore(&mut self) {
        self.entries.truncate(self.initial_len);
        self.pending = None;
    }

    /// Number of entries, including the CLEAR slot and the incomplete one.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The CLEAR code value.
    #[inline]
    pub fn clear_code(&self) -> usize {
        self.initial_len - 1
    }

    /// Settle the incomplete entry now that `code` is known to follow it.
    ///
    /// When `code` *is* the incomplete entry (the KwKwK case) its last byte
    /// equals its own first byte.
    pub fn complete_pending(&mut self, code: usize) {
        if let Some(pending) = self.pending.take() {
            let last = if pending == code {
                self.entries[pending].first
            } else {
                self.entries[code].first
            };
            self.entries[pending].byte = last;
        }
    }

    /// Append the string for `code` to `out`.
    pub fn write_string(&self, code: usize, out: &mut Vec<u8>) {
        let len = self.entries[code].len as usize;
        let start = out.len();
        out.resize(start + len, 0);

        let mut pos = start + len;
        let mut current = code as u32;
        while current != NO_PREFIX {
            let entry = &self.entries[current as usize];
            pos -= 1;
            out[pos] = entry.byte;
            current = entry.prefix;
        }
    }

    /// Add the incomplete entry `string(code) + ?`.
    pub fn push_incomplete(&mut self, code: usize) {
        let prefix = self.entries[code];
        self.entries.push(Entry {
            prefix: code as u32,
            byte: 0,
            first: prefix.first,
            len: prefix.len + 1,
        });
        self.pending = Some(self.entries.len() - 1);
    }
}

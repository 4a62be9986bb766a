//! Simulated VS1053 and output sink shared by the unit tests.

use heapless::{Deque, Vec};

use crate::codec::registers as reg;
use crate::codec::SciBus;
use crate::io::AudioSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// One bus access, in the order the device saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Write(u8, u16),
    Read(u8, u16),
    Wait(u32),
}

/// Register-level VS1053 model with an encoder output FIFO.
///
/// Every read of `SCI_HDAT1` first appends the next scripted batch of
/// words to the FIFO, simulating the encoder producing data between
/// polls. Words carry consecutive values starting at `first_word`.
pub struct MockVs1053 {
    pub log: Vec<Access, 8192>,
    regs: [u16; 16],
    fifo: Deque<u16, 4096>,
    arrivals: Deque<u16, 64>,
    next_word: u16,
    /// `SCI_AICTRL3` reads after the stop request before the encoder
    /// reports stopped.
    pub stop_latency: u32,
    stop_requested: bool,
    status_reads: u32,
    pub stopped: bool,
    /// Words the encoder flushes at the instant it reports stopped.
    pub flush_on_stop: u16,
    /// Whether the last flushed word carries a single byte.
    pub odd_last_byte: bool,
    /// Reads of this register fail.
    pub fail_reads_of: Option<u8>,
    /// Writes to this register fail.
    pub fail_writes_of: Option<u8>,
}

impl MockVs1053 {
    pub fn new() -> Self {
        Self {
            log: Vec::new(),
            regs: [0; 16],
            fifo: Deque::new(),
            arrivals: Deque::new(),
            next_word: 0x0100,
            stop_latency: 0,
            stop_requested: false,
            status_reads: 0,
            stopped: false,
            flush_on_stop: 0,
            odd_last_byte: false,
            fail_reads_of: None,
            fail_writes_of: None,
        }
    }

    /// Queue `count` words for immediate reading.
    pub fn preload(&mut self, count: u16) {
        for _ in 0..count {
            self.produce_word();
        }
    }

    /// Script the words produced before each successive `SCI_HDAT1` read.
    pub fn script(&mut self, batches: &[u16]) {
        for &n in batches {
            self.arrivals.push_back(n).unwrap();
        }
    }

    pub fn pending(&self) -> usize {
        self.fifo.len()
    }

    /// Value of the first word produced; later words count up from it.
    pub fn first_word(&self) -> u16 {
        0x0100
    }

    /// Big-endian bytes of the first `words` produced words.
    pub fn expected_bytes(&self, words: u16) -> Vec<u8, 8192> {
        let mut out = Vec::new();
        for i in 0..words {
            let w = self.first_word().wrapping_add(i);
            out.push((w >> 8) as u8).unwrap();
            out.push(w as u8).unwrap();
        }
        out
    }

    pub fn writes(&self) -> impl Iterator<Item = (u8, u16)> + '_ {
        self.log.iter().filter_map(|a| match *a {
            Access::Write(r, v) => Some((r, v)),
            _ => None,
        })
    }

    pub fn writes_to(&self, register: u8) -> impl Iterator<Item = u16> + '_ {
        self.writes().filter(move |&(r, _)| r == register).map(|(_, v)| v)
    }

    pub fn reads_of(&self, register: u8) -> usize {
        self.log
            .iter()
            .filter(|a| matches!(a, Access::Read(r, _) if *r == register))
            .count()
    }

    pub fn reg(&self, register: u8) -> u16 {
        self.regs[register as usize & 0xF]
    }

    fn produce_word(&mut self) {
        self.fifo.push_back(self.next_word).unwrap();
        self.next_word = self.next_word.wrapping_add(1);
    }

    fn status(&mut self) -> u16 {
        if self.stop_requested && !self.stopped {
            self.status_reads += 1;
            if self.status_reads > self.stop_latency {
                self.stopped = true;
                for _ in 0..self.flush_on_stop {
                    self.produce_word();
                }
            }
        }
        let mut value = self.regs[reg::SCI_AICTRL3 as usize] & !reg::AICTRL3_STOP_REQUEST;
        if self.stopped {
            value |= reg::AICTRL3_STOPPED;
            if self.odd_last_byte {
                value |= reg::AICTRL3_ODD_LAST_BYTE;
            }
        }
        value
    }
}

impl SciBus for MockVs1053 {
    type Error = MockError;

    fn write_register(&mut self, register: u8, value: u16) -> Result<(), Self::Error> {
        if self.fail_writes_of == Some(register) {
            return Err(MockError);
        }
        let _ = self.log.push(Access::Write(register, value));
        if register == reg::SCI_AICTRL3 && value & reg::AICTRL3_STOP_REQUEST != 0 {
            self.stop_requested = true;
        }
        self.regs[register as usize & 0xF] = value;
        Ok(())
    }

    fn read_register(&mut self, register: u8) -> Result<u16, Self::Error> {
        if self.fail_reads_of == Some(register) {
            return Err(MockError);
        }
        let value = match register {
            reg::SCI_HDAT1 => {
                if let Some(n) = self.arrivals.pop_front() {
                    for _ in 0..n {
                        self.produce_word();
                    }
                }
                self.fifo.len() as u16
            }
            reg::SCI_HDAT0 => self.fifo.pop_front().unwrap_or(0),
            reg::SCI_AICTRL3 => self.status(),
            r => self.regs[r as usize & 0xF],
        };
        let _ = self.log.push(Access::Read(register, value));
        Ok(value)
    }

    fn wait_ready(&mut self, timeout_ms: u32) -> Result<(), Self::Error> {
        let _ = self.log.push(Access::Wait(timeout_ms));
        Ok(())
    }
}

/// Byte sink collecting output in memory.
pub struct MockSink {
    data: Vec<u8, 8192>,
    pub open_count: u32,
    pub close_count: u32,
    /// Fail the write that would take the stream past this many bytes.
    pub capacity: Option<usize>,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            open_count: 0,
            close_count: 0,
            capacity: None,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Opener handing out this sink, counting the calls.
    pub fn opener<'a>(&'a mut self) -> impl FnOnce() -> Result<&'a mut Self, MockError> + 'a {
        move || {
            self.open_count += 1;
            Ok(self)
        }
    }
}

impl AudioSink for MockSink {
    type Error = MockError;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        if self.capacity.is_some_and(|cap| self.data.len() >= cap) {
            return Err(MockError);
        }
        self.data.push(byte).map_err(|_| MockError)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        self.close_count += 1;
        Ok(())
    }
}

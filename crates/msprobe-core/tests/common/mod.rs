//! Test doubles shared by the integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

use msprobe_core::access::ChipAccess;
use msprobe_core::error::{AccessError, AccessResult, ProbeError, ProbeResult};
use msprobe_core::sink::Sink;
use msprobe_core::types::{Address, Region, RegisterSnapshot};

/// A chip whose RAM and procedure results are set up by the test
pub struct ScriptedChip
{
    ram: Vec<u8>,
    /// Number of upcoming memory reads that come back empty
    pub empty_reads: usize,
    /// Zero-based index of a single later read that comes back empty
    pub empty_read_at: Option<usize>,
    /// Result of every procedure call; `None` makes calls fail
    pub registers: Option<RegisterSnapshot>,
    /// Every region read, in order
    pub reads: Vec<Region>,
    /// Every procedure entry called, in order
    pub calls: Vec<Address>,
}

impl ScriptedChip
{
    pub fn new() -> Self
    {
        ScriptedChip {
            ram: vec![0; 0x1_0000],
            empty_reads: 0,
            empty_read_at: None,
            registers: None,
            reads: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Write bytes into RAM starting at `address`
    pub fn poke(&mut self, address: u16, bytes: &[u8]) -> &mut Self
    {
        let start = usize::from(address);
        self.ram[start..start + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// RAM as the flaky windows look with a 1080p HDMI RGB source locked
    pub fn flaky_1080p() -> Self
    {
        let mut chip = ScriptedChip::new();
        chip.poke(0xf660, &[0x80, 0x07, 0x38, 0x04])
            .poke(0xf6e9, &[0x00])
            .poke(0x1c3a, &[0x00])
            .poke(0x1c41, &[0x02]);
        chip
    }
}

impl ChipAccess for ScriptedChip
{
    fn read_memory(&mut self, region: &Region) -> AccessResult<Vec<u8>>
    {
        self.reads.push(*region);
        if self.empty_reads > 0 {
            self.empty_reads -= 1;
            return Ok(Vec::new());
        }
        if self.empty_read_at == Some(self.reads.len() - 1) {
            return Ok(Vec::new());
        }

        let start = usize::from(region.address.value());
        let end = (start + region.size()).min(self.ram.len());
        Ok(self.ram[start..end].to_vec())
    }

    fn call_procedure(&mut self, entry: Address) -> AccessResult<RegisterSnapshot>
    {
        self.calls.push(entry);
        self.registers.ok_or(AccessError::ProcedureFailed {
            entry,
            details: "scripted failure".to_string(),
        })
    }
}

/// Sink that keeps every report; clones share the same storage
#[derive(Clone, Default)]
pub struct CollectSink
{
    pub reports: Rc<RefCell<Vec<String>>>,
}

impl CollectSink
{
    pub fn count(&self) -> usize
    {
        self.reports.borrow().len()
    }
}

impl Sink for CollectSink
{
    fn write(&mut self, rendered: &str) -> ProbeResult<()>
    {
        self.reports.borrow_mut().push(rendered.to_string());
        Ok(())
    }
}

/// Sink whose every write fails; counts the attempts
#[derive(Clone, Default)]
pub struct FailingSink
{
    pub attempts: Rc<Cell<usize>>,
}

impl Sink for FailingSink
{
    fn write(&mut self, _rendered: &str) -> ProbeResult<()>
    {
        self.attempts.set(self.attempts.get() + 1);
        Err(ProbeError::Sink {
            destination: "nowhere".to_string(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"),
        })
    }
}

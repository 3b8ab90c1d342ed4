//! Breakpoint/continue driver over [`Vm::step`].
//!
//! The driver never reads input itself. A front end asks for the next
//! [`Event`], shows the paused state, parses a [`Command`] and hands it to
//! [`Debugger::apply`], then calls [`Debugger::resume`].

use std::num::NonZeroU64;
use std::str::FromStr;

use bitvec::prelude::*;
use tracing::debug;

use crate::config::VmConfig;
use crate::isa::Instruction;
use crate::vm::{RunOutcome, Vm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Execute one instruction.
    Next,
    /// Toggle the breakpoint on the paused instruction.
    Breakpoint,
    /// Toggle continue-until-breakpoint, then execute.
    Continue,
    /// Stop pausing and run to the end.
    Run,
    Quit,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid operation \"{0}\", expected one of n, b, c, r, q")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    /// Only the first character counts; an empty reply means `Next`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            None | Some('n') => Ok(Command::Next),
            Some('b') => Ok(Command::Breakpoint),
            Some('c') => Ok(Command::Continue),
            Some('r') => Ok(Command::Run),
            Some('q') => Ok(Command::Quit),
            Some(_) => Err(UnknownCommand(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pause {
    pub pc: u32,
    /// Paused because of a breakpoint on `pc`.
    pub breakpoint: bool,
    pub continuing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Paused(Pause),
    Finished(RunOutcome),
    /// A stop was requested; the VM keeps the state of the last completed step.
    Stopped,
}

/// What the front end should do after [`Debugger::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Stay paused and prompt again. Carries the new breakpoint state.
    Breakpoint(bool),
    Resume,
    Quit,
}

#[derive(Debug, Clone)]
pub struct Debugger {
    breakpoints: BitVec,
    continuing: bool,
    detached: bool,
    stop: bool,
    step_limit: Option<NonZeroU64>,
    steps: u64,
}

impl Debugger {
    pub fn new(program_len: usize) -> Self {
        Self {
            breakpoints: bitvec![0; program_len],
            continuing: false,
            detached: false,
            stop: false,
            step_limit: None,
            steps: 0,
        }
    }

    pub fn with_config(program_len: usize, cfg: &VmConfig) -> Self {
        let mut dbg = Self::new(program_len);
        for &pc in &cfg.breakpoints {
            dbg.set_breakpoint(pc, true);
        }
        dbg.step_limit = cfg.step_limit;
        dbg
    }

    pub fn has_breakpoint(&self, pc: u32) -> bool {
        self.breakpoints.get(pc as usize).is_some_and(|b| *b)
    }

    /// Out-of-range indices are ignored.
    pub fn set_breakpoint(&mut self, pc: u32, on: bool) {
        if let Some(mut bit) = self.breakpoints.get_mut(pc as usize) {
            *bit = on;
        }
    }

    pub fn toggle_breakpoint(&mut self, pc: u32) -> bool {
        let on = !self.has_breakpoint(pc);
        self.set_breakpoint(pc, on);
        on
    }

    pub fn breakpoints(&self) -> impl Iterator<Item = u32> + '_ {
        self.breakpoints.iter_ones().map(|i| i as u32)
    }

    pub fn is_continuing(&self) -> bool {
        self.continuing
    }

    /// Cooperative stop, honored before the next step.
    pub fn request_stop(&mut self) {
        self.stop = true;
    }

    /// Applies a command to the session paused at `pc`.
    pub fn apply(&mut self, cmd: Command, pc: u32) -> Reply {
        match cmd {
            Command::Next => Reply::Resume,
            Command::Breakpoint => Reply::Breakpoint(self.toggle_breakpoint(pc)),
            Command::Continue => {
                self.continuing = !self.continuing;
                Reply::Resume
            }
            Command::Run => {
                self.detached = true;
                Reply::Resume
            }
            Command::Quit => {
                self.request_stop();
                Reply::Quit
            }
        }
    }

    fn pause_at(&self, pc: u32) -> Option<Pause> {
        if self.detached {
            return None;
        }
        let breakpoint = self.has_breakpoint(pc);
        (!self.continuing || breakpoint).then_some(Pause {
            pc,
            breakpoint,
            continuing: self.continuing,
        })
    }

    /// Runs from the current state to the next event. With `skip_pause` the
    /// instruction at the current PC executes even if it would pause.
    fn advance(&mut self, vm: &mut Vm, program: &[Instruction], mut skip_pause: bool) -> Event {
        loop {
            if self.stop {
                debug!(pc = vm.pc(), steps = self.steps, "debug session stopped");
                return Event::Stopped;
            }
            if vm.is_halted(program) {
                return Event::Finished(RunOutcome::Completed { steps: self.steps });
            }
            if !skip_pause {
                if let Some(p) = self.pause_at(vm.pc()) {
                    return Event::Paused(p);
                }
            }
            if self.step_limit.is_some_and(|l| self.steps >= l.get()) {
                return Event::Finished(RunOutcome::Incomplete { steps: self.steps });
            }
            vm.step(program);
            self.steps += 1;
            skip_pause = false;
        }
    }

    /// First event of a session, before any instruction has run.
    pub fn start(&mut self, vm: &mut Vm, program: &[Instruction]) -> Event {
        self.advance(vm, program, false)
    }

    /// Leaves a pause: executes the paused instruction and runs to the next event.
    pub fn resume(&mut self, vm: &mut Vm, program: &[Instruction]) -> Event {
        self.advance(vm, program, true)
    }
}

use std::num::NonZeroU64;

use vmal_rs::debug::{Command, Debugger, Event, Pause, Reply, UnknownCommand};
use vmal_rs::{assemble_str, Program, Reg, RunOutcome, Vm, VmConfig};

const PROG: &str = "\
MV 1, 6;
ADD 1, 6;
ADD 1, 6;
MV 2, 1;
";

fn setup(src: &str) -> (Program, Vm) {
    let p = assemble_str(src).unwrap();
    let vm = Vm::from_program(&p);
    (p, vm)
}

fn paused(pc: u32, breakpoint: bool, continuing: bool) -> Event {
    Event::Paused(Pause {
        pc,
        breakpoint,
        continuing,
    })
}

#[test]
fn commands_parse_from_first_character() {
    assert_eq!("".parse::<Command>(), Ok(Command::Next));
    assert_eq!("  ".parse::<Command>(), Ok(Command::Next));
    assert_eq!("N".parse::<Command>(), Ok(Command::Next));
    assert_eq!("break".parse::<Command>(), Ok(Command::Breakpoint));
    assert_eq!("c".parse::<Command>(), Ok(Command::Continue));
    assert_eq!("Run".parse::<Command>(), Ok(Command::Run));
    assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    assert_eq!(
        "x".parse::<Command>(),
        Err(UnknownCommand("x".into()))
    );
}

#[test]
fn steps_one_instruction_per_resume() {
    let (p, mut vm) = setup(PROG);
    let mut dbg = Debugger::new(p.len());
    assert_eq!(dbg.start(&mut vm, &p.instructions), paused(0, false, false));
    assert_eq!(vm.steps(), 0);
    assert_eq!(dbg.apply(Command::Next, 0), Reply::Resume);
    assert_eq!(dbg.resume(&mut vm, &p.instructions), paused(1, false, false));
    assert_eq!(vm.reg(Reg::new(1).unwrap()), 1);
}

#[test]
fn continue_runs_to_breakpoint_then_end() {
    let (p, mut vm) = setup(PROG);
    let mut dbg = Debugger::new(p.len());
    dbg.set_breakpoint(2, true);
    assert_eq!(dbg.start(&mut vm, &p.instructions), paused(0, false, false));
    assert_eq!(dbg.apply(Command::Continue, 0), Reply::Resume);
    assert!(dbg.is_continuing());
    assert_eq!(dbg.resume(&mut vm, &p.instructions), paused(2, true, true));
    assert_eq!(vm.reg(Reg::new(1).unwrap()), 2);
    assert_eq!(
        dbg.resume(&mut vm, &p.instructions),
        Event::Finished(RunOutcome::Completed { steps: 4 })
    );
    assert_eq!(vm.reg(Reg::new(2).unwrap()), 3);
}

#[test]
fn breakpoint_toggles_without_stepping() {
    let (p, mut vm) = setup(PROG);
    let mut dbg = Debugger::new(p.len());
    dbg.start(&mut vm, &p.instructions);
    assert_eq!(dbg.apply(Command::Breakpoint, 0), Reply::Breakpoint(true));
    assert!(dbg.has_breakpoint(0));
    assert_eq!(dbg.apply(Command::Breakpoint, 0), Reply::Breakpoint(false));
    assert!(!dbg.has_breakpoint(0));
    assert_eq!(vm.steps(), 0);
}

#[test]
fn run_detaches_past_breakpoints() {
    let (p, mut vm) = setup(PROG);
    let mut dbg = Debugger::new(p.len());
    dbg.set_breakpoint(3, true);
    dbg.start(&mut vm, &p.instructions);
    assert_eq!(dbg.apply(Command::Run, 0), Reply::Resume);
    assert_eq!(
        dbg.resume(&mut vm, &p.instructions),
        Event::Finished(RunOutcome::Completed { steps: 4 })
    );
}

#[test]
fn quit_stops_before_next_step() {
    let (p, mut vm) = setup(PROG);
    let mut dbg = Debugger::new(p.len());
    dbg.start(&mut vm, &p.instructions);
    assert_eq!(dbg.apply(Command::Quit, 0), Reply::Quit);
    assert_eq!(dbg.resume(&mut vm, &p.instructions), Event::Stopped);
    assert_eq!(vm.steps(), 0);
    assert_eq!(vm.pc(), 0);
}

#[test]
fn continue_in_infinite_loop_pauses_on_breakpoint() {
    let (p, mut vm) = setup("LBL top;\nGO top;");
    let mut dbg = Debugger::new(p.len());
    dbg.start(&mut vm, &p.instructions);
    dbg.apply(Command::Breakpoint, 0);
    dbg.apply(Command::Continue, 0);
    assert_eq!(dbg.resume(&mut vm, &p.instructions), paused(0, true, true));
    assert_eq!(vm.steps(), 1);
}

#[test]
fn config_arms_breakpoints_and_budget() {
    let (p, mut vm) = setup(PROG);
    let cfg = VmConfig {
        step_limit: NonZeroU64::new(2),
        breakpoints: vec![3, 99],
        ..VmConfig::default()
    };
    let mut dbg = Debugger::with_config(p.len(), &cfg);
    assert_eq!(dbg.breakpoints().collect::<Vec<_>>(), vec![3]);
    dbg.start(&mut vm, &p.instructions);
    dbg.apply(Command::Run, 0);
    assert_eq!(
        dbg.resume(&mut vm, &p.instructions),
        Event::Finished(RunOutcome::Incomplete { steps: 2 })
    );
    assert_eq!(vm.pc(), 2);
}

#[test]
fn empty_program_finishes_at_start() {
    let (p, mut vm) = setup("");
    let mut dbg = Debugger::new(p.len());
    assert_eq!(
        dbg.start(&mut vm, &p.instructions),
        Event::Finished(RunOutcome::Completed { steps: 0 })
    );
}

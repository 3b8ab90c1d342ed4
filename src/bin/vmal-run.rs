use std::io::{self, BufRead, Write};
use std::num::NonZeroU64;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vmal_rs::debug::{Command, Debugger, Event, Reply};
use vmal_rs::disasm::{fmt_flags, fmt_instruction, fmt_listing, fmt_memory, fmt_registers};
use vmal_rs::{assemble_str, Program, RunOutcome, Vm, VmConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble and run a VMAL program")]
struct Opts {
    /// Step through the program interactively
    #[arg(short, long)]
    debug: bool,
    /// Stop after this many instructions
    #[arg(short, long)]
    limit: Option<NonZeroU64>,
    /// JSON run configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print the assembled listing before running
    #[arg(long)]
    listing: bool,
    #[arg(value_name = "VMALFILE")]
    input: PathBuf,
}

fn print_state(vm: &Vm) {
    println!();
    println!("Registers:");
    print!("{}", fmt_registers(vm.registers()));
    println!();
    println!("Flags:");
    print!("{}", fmt_flags(vm.flags()));
}

fn debug_session(vm: &mut Vm, program: &Program, cfg: &VmConfig) -> Result<Option<RunOutcome>> {
    let code = &program.instructions;
    let mut dbg = Debugger::with_config(code.len(), cfg);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut event = dbg.start(vm, code);
    loop {
        let pause = match event {
            Event::Paused(p) => p,
            Event::Finished(outcome) => return Ok(Some(outcome)),
            Event::Stopped => return Ok(None),
        };
        print_state(vm);
        println!();
        if pause.continuing {
            println!("Continue till Breakpoint");
        }
        if pause.breakpoint {
            println!("BREAKPOINT");
        }
        println!("Operation: {}", fmt_instruction(&code[pause.pc as usize]));

        loop {
            print!("Debug (n,b,c,r,q): ");
            io::stdout().flush()?;
            // EOF on stdin behaves like quit
            let Some(line) = lines.next().transpose()? else {
                dbg.request_stop();
                break;
            };
            let cmd = match line.parse::<Command>() {
                Ok(cmd) => cmd,
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            };
            match dbg.apply(cmd, pause.pc) {
                Reply::Breakpoint(on) => {
                    println!("Turning Breakpoint {}", if on { "ON" } else { "OFF" });
                }
                Reply::Resume | Reply::Quit => break,
            }
        }
        event = dbg.resume(vm, code);
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let mut cfg = match &opts.config {
        Some(path) => VmConfig::from_json_file(path)?,
        None => VmConfig::default(),
    };
    if opts.limit.is_some() {
        cfg.step_limit = opts.limit;
    }
    cfg.show_listing |= opts.listing;

    let source = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    let program = match assemble_str(&source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e.render());
            return Ok(ExitCode::FAILURE);
        }
    };

    if cfg.show_listing {
        println!("Assembled Code:");
        print!("{}", fmt_listing(&program.instructions));
    }

    let mut vm = Vm::from_program(&program);
    let outcome = if opts.debug {
        debug_session(&mut vm, &program, &cfg)?
    } else {
        Some(vm.run(&program.instructions, cfg.step_limit))
    };

    match outcome {
        Some(RunOutcome::Completed { steps }) => println!("Finished after {steps} steps"),
        Some(RunOutcome::Incomplete { steps }) => {
            println!("Step limit reached after {steps} steps, program incomplete")
        }
        None => println!("Quit at instruction {}", vm.pc()),
    }
    println!();
    println!("Final Register State:");
    print!("{}", fmt_registers(vm.registers()));
    if !vm.memory().is_empty() {
        println!();
        println!("Memory:");
        print!("{}", fmt_memory(vm.memory()));
    }
    Ok(ExitCode::SUCCESS)
}

use pretty_assertions::assert_eq;
use vmal_rs::literal::{Base, LiteralContext};
use vmal_rs::{assemble, assemble_str, AsmErrorKind, Instruction, MemInit, Reg, RegInit, Target};

fn r(i: u8) -> Reg {
    Reg::new(i).unwrap()
}

fn err_kind(src: &str) -> (usize, AsmErrorKind) {
    let e = assemble_str(src).unwrap_err();
    (e.line, e.kind)
}

#[test]
fn initializers_and_operations() {
    let src = "\
# header comment

A: 5;
[0x10]: 0b101;   # memory
MV 1, a;   # copy
rd;
";
    let p = assemble_str(src).unwrap();
    assert_eq!(p.instructions, vec![Instruction::Mv(r(1), r(10)), Instruction::Rd]);
    assert_eq!(p.reg_inits, vec![RegInit { reg: r(10), value: 5 }]);
    assert_eq!(p.mem_inits, vec![MemInit { addr: 0x10, value: 5 }]);
}

#[test]
fn accepts_lines_from_any_string_source() {
    let lines = vec![String::from("SB 2;"), String::from("WR;")];
    let p = assemble(&lines).unwrap();
    assert_eq!(p.instructions, vec![Instruction::Sb(r(2)), Instruction::Wr]);
}

#[test]
fn duplicate_register_initializers_keep_source_order() {
    let p = assemble_str("1: 3;\n1: -1;\n").unwrap();
    assert_eq!(
        p.reg_inits,
        vec![
            RegInit { reg: r(1), value: 3 },
            RegInit { reg: r(1), value: u32::MAX },
        ]
    );
    assert!(p.instructions.is_empty());
}

#[test]
fn mnemonics_are_case_insensitive() {
    let p = assemble_str("add 1, 2;\nLbl x;\nGo x;\nsw F, e;").unwrap();
    assert_eq!(
        p.instructions,
        vec![
            Instruction::Add(r(1), r(2)),
            Instruction::Go(Target(0)),
            Instruction::Sw(r(15), r(14)),
        ]
    );
}

#[test]
fn label_maps_to_index_before_next_instruction() {
    let p = assemble_str("RD;\nRD;\nLBL x;\nWR;\nGO x;").unwrap();
    assert_eq!(p.instructions[3], Instruction::Go(Target(1)));
    assert_eq!(Target(1).landing(), 2);
}

#[test]
fn label_before_first_instruction_wraps() {
    let p = assemble_str("LBL top;\nGO top;").unwrap();
    assert_eq!(p.instructions, vec![Instruction::Go(Target(u32::MAX))]);
    assert_eq!(Target(u32::MAX).landing(), 0);
}

#[test]
fn forward_references_resolve_in_second_pass() {
    let p = assemble_str("GO end;\nRD;\nLBL end;\nWR;\nBIN end;\nBIZ end;").unwrap();
    assert_eq!(p.instructions[0], Instruction::Go(Target(1)));
    assert_eq!(p.instructions[3], Instruction::Bin(Target(1)));
    assert_eq!(p.instructions[4], Instruction::Biz(Target(1)));
    assert_eq!(p.instructions[4].target(), Some(&Target(1)));
    assert_eq!(p.instructions[1].target(), None);
}

#[test]
fn missing_terminator() {
    let e = assemble_str("RD;\nMV A, B\nWR;").unwrap_err();
    assert_eq!(e.line, 2);
    assert_eq!(e.text, "MV A, B");
    assert_eq!(e.kind, AsmErrorKind::MissingTerminator);
    assert_eq!(e.to_string(), "Error on line #2: Missing semicolon");
    assert_eq!(e.render(), "Error on line #2: Missing semicolon\n\t> MV A, B");
}

#[test]
fn terminator_inside_comment_does_not_count() {
    assert_eq!(err_kind("RD # ;"), (1, AsmErrorKind::MissingTerminator));
}

#[test]
fn trailing_content_after_terminator() {
    assert_eq!(
        err_kind("RD; WR;"),
        (1, AsmErrorKind::TrailingContent("WR;".into()))
    );
    assert!(assemble_str("RD;   # fine").is_ok());
}

#[test]
fn bad_initializer_shapes() {
    assert_eq!(err_kind("AB: 5;"), (1, AsmErrorKind::InvalidInitializerSyntax));
    assert_eq!(err_kind("[4: 5;"), (1, AsmErrorKind::InvalidInitializerSyntax));
    assert_eq!(err_kind(": 5;"), (1, AsmErrorKind::InvalidInitializerSyntax));
    assert_eq!(err_kind("G: 1;"), (1, AsmErrorKind::InvalidRegister("G".into())));
}

#[test]
fn bad_literals_name_their_context() {
    assert_eq!(
        err_kind("RD;\n1: 0xG;"),
        (
            2,
            AsmErrorKind::InvalidLiteral {
                context: LiteralContext::Register,
                base: Base::Hex,
                text: "0xG".into(),
            }
        )
    );
    assert_eq!(
        err_kind("[zz]: 1;"),
        (
            1,
            AsmErrorKind::InvalidLiteral {
                context: LiteralContext::Memory,
                base: Base::Decimal,
                text: "zz".into(),
            }
        )
    );
    let e = assemble_str("[0]: 0b12;").unwrap_err();
    assert_eq!(
        e.to_string(),
        "Error on line #1: Invalid binary literal in memory initializer - \"0b12\""
    );
}

#[test]
fn unknown_operation() {
    assert_eq!(
        err_kind("jmp top;"),
        (1, AsmErrorKind::UnknownOperation("JMP".into()))
    );
}

#[test]
fn arity_is_checked_per_class() {
    assert_eq!(
        err_kind("ADD 1;"),
        (
            1,
            AsmErrorKind::ArityMismatch {
                op: "ADD",
                expected: "2 registers",
                actual: 1
            }
        )
    );
    assert_eq!(
        err_kind("RD 1;"),
        (
            1,
            AsmErrorKind::ArityMismatch {
                op: "RD",
                expected: "no arguments",
                actual: 1
            }
        )
    );
    assert_eq!(
        err_kind("SA;"),
        (
            1,
            AsmErrorKind::ArityMismatch {
                op: "SA",
                expected: "1 register",
                actual: 0
            }
        )
    );
    assert_eq!(
        err_kind("GO a, b;"),
        (
            1,
            AsmErrorKind::ArityMismatch {
                op: "GO",
                expected: "1 label",
                actual: 2
            }
        )
    );
}

#[test]
fn register_operands_must_be_one_hex_digit() {
    assert_eq!(err_kind("MV 10, 1;"), (1, AsmErrorKind::InvalidRegister("10".into())));
    assert_eq!(err_kind("SF x;"), (1, AsmErrorKind::InvalidRegister("x".into())));
}

#[test]
fn label_definitions_are_validated() {
    assert_eq!(
        err_kind("LBL a;\nRD;\nLBL a;"),
        (3, AsmErrorKind::DuplicateLabel("a".into()))
    );
    assert_eq!(
        err_kind("LBL 1abc;"),
        (1, AsmErrorKind::InvalidLabelName("1abc".into()))
    );
    assert!(assemble_str("LBL _ok_2;").is_ok());
}

#[test]
fn undefined_label_reports_the_jump_line() {
    let e = assemble_str("RD;\nGO missing;   # nowhere\nWR;").unwrap_err();
    assert_eq!(e.line, 2);
    assert_eq!(e.text, "GO missing;   # nowhere");
    assert_eq!(e.kind, AsmErrorKind::UndefinedLabel("missing".into()));
}

#[test]
fn first_pass_errors_win_over_undefined_labels() {
    // the undefined label on line 1 is only checked once every line parsed
    assert_eq!(err_kind("GO missing;\nRD"), (2, AsmErrorKind::MissingTerminator));
}

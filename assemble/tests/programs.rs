use hack_assemble::*;
use hack_common::hexfile::HexFile;
use hack_common::Instruction;

fn expected(hack: &str) -> Vec<String> {
    hack.lines().map(|l| l.to_owned()).collect()
}

fn check(asm: &str, hack: &str) {
    let code = assemble_from_str(asm).unwrap();
    assert_eq!(expected(hack), code.to_text_lines());
}

#[test]
fn max() {
    check(
        include_str!("../programs/Max.asm"),
        include_str!("../programs/Max.hack"));
}

#[test]
fn sum() {
    check(
        include_str!("../programs/Sum.asm"),
        include_str!("../programs/Sum.hack"));
}

#[test]
fn sum_symbols() {
    let (_, session) = Assembler::new()
        .assemble_session(include_str!("../programs/Sum.asm").lines())
        .unwrap();
    assert_eq!(Some(16), session.resolve("i"));
    assert_eq!(Some(17), session.resolve("sum"));
    assert_eq!(Some(4), session.resolve("LOOP"));
    assert_eq!(Some(18), session.resolve("END"));
    assert_eq!(18, session.next_free());
}

#[test]
fn listing_disassembles_every_line() {
    let code = assemble_from_str(include_str!("../programs/Max.asm")).unwrap();
    let listing = code.listing();
    assert_eq!(code.len(), listing.len());
    assert!(listing[0].ends_with("; @0"));
    assert!(listing[3].ends_with("; D=D-M"));
    assert!(listing[5].ends_with("; D;JGT"));
    assert!(listing.iter().all(|l| !l.ends_with("; ?")));

    // decoding every word and assembling the result reproduces the program
    let reassembled: Vec<String> = code.words()
        .iter()
        .map(|w| Instruction::decode(*w).unwrap().to_string())
        .collect();
    assert_eq!(code.words(), assemble(reassembled).unwrap().words());
}

#[test]
fn binary_and_hex_renderings() {
    let code = assemble_from_str(include_str!("../programs/Sum.asm")).unwrap();

    let mut bin = Vec::new();
    code.write_to(OutputFormat::Bin, &mut bin).unwrap();
    assert_eq!(2 * code.len(), bin.len());
    let words: Vec<u16> = bin
        .chunks(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    assert_eq!(code.words(), words.as_slice());

    let mut hex = Vec::new();
    code.write_to(OutputFormat::Hex, &mut hex).unwrap();
    assert_eq!(code.words(), HexFile::read(hex.as_slice()).unwrap().words().as_slice());
}

#[test]
fn screen_and_keyboard() {
    let code = assemble_from_str("
        @KBD
        D=M
        @SCREEN
        M=-1
        @R0
        AM=M - 1;JNE
    ").unwrap();
    assert_eq!(
        &[0x6000u16, 0xfc10, 0x4000, 0xee88, 0x0000, 0xfcad],
        code.words());
}

#[test]
fn error_reports_source_line() {
    let err = assemble_from_str(include_str!("../programs/Max.asm").replace("D;JGT", "D;JG").as_str())
        .unwrap_err();
    assert_eq!(&AsmErrorKind::UnknownOperator("JG".to_owned()), err.kind());
    let line = err.line().unwrap();
    assert_eq!(8, line.number());
    assert_eq!("D;JG", line.text());
}

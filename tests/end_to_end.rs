use chip8_vm::constants::ROM_START;
use chip8_vm::{compile_program, decompile_program, Chip8};

fn assemble(lines: &[&str]) -> Vec<u16> {
    let result = compile_program(lines);
    assert!(result.failures.is_empty(), "failed lines {:?}", result.failures);
    result.program
}

fn run_until_paused(chip8: &mut Chip8, max_cycles: usize) {
    for _ in 0..max_cycles {
        if chip8.is_paused() {
            return;
        }
        chip8.run_cycle();
    }
}

#[test]
fn test_two_steps() {
    let mut chip8 = Chip8::new();
    chip8
        .load_program(&assemble(&["mov v0, 0x05", "add v0, 0x01"]))
        .unwrap();
    chip8.step();
    chip8.step();
    assert_eq!(chip8.registers()[0x0], 0x06);
    assert_eq!(chip8.pc(), ROM_START as u16 + 4);
}

#[test]
fn test_subroutine_and_loop() {
    // v1 = 3 * 4 computed by adding 4 in a subroutine three times
    let program = assemble(&[
        "mov v0, 0x03",  // 0x200
        "call 0x20C",    // 0x202
        "add v0, 0xFF",  // 0x204
        "se v0, 0x00",   // 0x206
        "jmp 0x202",     // 0x208
        "0xFFFF",        // 0x20A halts
        "add v1, 0x04",  // 0x20C
        "ret",           // 0x20E
    ]);
    let mut chip8 = Chip8::new();
    chip8.load_program(&program).unwrap();
    run_until_paused(&mut chip8, 100);
    assert!(chip8.is_paused());
    assert_eq!(chip8.registers()[0x1], 12);
    assert_eq!(chip8.pc(), 0x20A);
    assert!(chip8.stack().is_empty());
}

#[test]
fn test_draws_font_digit() {
    let program = assemble(&[
        "mov v0, 0x08",
        "font v0",
        "mov v1, 0x00",
        "drw v1, v1, 0x5",
        "drw v1, v1, 0x5",
    ]);
    let mut chip8 = Chip8::new();
    chip8.load_program(&program).unwrap();
    for _ in 0..4 {
        chip8.run_cycle();
    }
    // the glyph for 8 starts with 0xF0
    let display = chip8.display();
    let top_row = &display.data()[..8];
    let fg = display.foreground_color();
    let bg = display.background_color();
    assert_eq!(top_row, &[fg, fg, fg, fg, bg, bg, bg, bg]);
    assert_eq!(chip8.registers()[0xF], 0);

    chip8.run_cycle();
    assert_eq!(chip8.registers()[0xF], 1);
    assert!(chip8.display().data().iter().all(|pixel| *pixel == bg));
}

#[test]
fn test_bcd_then_load() {
    let program = assemble(&[
        "mov v0, 0xFE",
        "mov i, 0x300",
        "bcd v0",
        "ld v2",
    ]);
    let mut chip8 = Chip8::new();
    chip8.load_program(&program).unwrap();
    run_until_paused(&mut chip8, 10);
    assert_eq!(&chip8.registers()[..3], &[2, 5, 4]);
    assert_eq!(chip8.i(), 0x303);
}

#[test]
fn test_key_wait_round_trip() {
    let program = assemble(&["key v5", "skp v5", "0xFFFF", "mov va, 0x01"]);
    let mut chip8 = Chip8::new();
    chip8.load_program(&program).unwrap();
    chip8.run_cycle();
    assert!(chip8.is_paused());
    for _ in 0..5 {
        chip8.run_cycle();
    }
    assert_eq!(chip8.pc(), 0x200);

    chip8.set_key_state(0x9, true);
    chip8.run_cycle();
    chip8.run_cycle();
    assert_eq!(chip8.registers()[0x5], 0x9);
    assert_eq!(chip8.registers()[0xA], 0x1);
}

#[test]
fn test_disassembled_rom_reassembles() {
    let rom = [
        0x00, 0xE0, 0x6A, 0x05, 0x8A, 0xB4, 0x8A, 0xA6, 0x81, 0x2F, 0xD1, 0x25, 0xF3, 0x65, 0x00,
        0xEE,
    ];
    let listing = decompile_program(&rom);
    assert_eq!(listing.failures, vec![4]);
    let reassembled = compile_program(&listing.program);
    assert!(reassembled.failures.is_empty());
    assert_eq!(reassembled.to_bytes(), rom.to_vec());
}

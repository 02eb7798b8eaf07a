use crate::instruction::Instruction;
use crate::state::State;

/// What the machine should do after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Stop executing until resumed.
    Pause,
}

const FLAG: usize = 0xF;

fn skip_if(state: &mut State, condition: bool) -> Flow {
    if condition {
        state.advance_pc();
    }
    state.advance_pc();
    Flow::Continue
}

/// Runs `f` against Vx and Vy, stores its result in Vx and its flag in VF.
///
/// VF is written last so that the flag survives when x is 0xF.
fn alu(state: &mut State, instr: Instruction, f: fn(u8, u8) -> (u8, bool)) -> Flow {
    let (result, flag) = f(state.v[instr.x as usize], state.v[instr.y as usize]);
    state.v[instr.x as usize] = result;
    state.v[FLAG] = flag as u8;
    state.advance_pc();
    Flow::Continue
}

/// Like `alu`, but VF is written first so the result survives when x is 0xF.
fn alu_flag_first(state: &mut State, instr: Instruction, f: fn(u8, u8) -> (u8, bool)) -> Flow {
    let (result, flag) = f(state.v[instr.x as usize], state.v[instr.y as usize]);
    state.v[FLAG] = flag as u8;
    state.v[instr.x as usize] = result;
    state.advance_pc();
    Flow::Continue
}

/// machine code routine at nnn; ignored
pub fn sys_nnn(state: &mut State, _instr: Instruction) -> Flow {
    state.advance_pc();
    Flow::Continue
}

/// clear
pub fn cls(state: &mut State, _instr: Instruction) -> Flow {
    state.screen.clear();
    state.advance_pc();
    Flow::Continue
}

/// PC = STACK.pop() + 2
pub fn ret(state: &mut State, _instr: Instruction) -> Flow {
    match state.stack.pop() {
        Some(addr) => {
            state.pc = addr;
            state.advance_pc();
            Flow::Continue
        }
        None => {
            log::error!("ret with an empty stack at {:#05X}", state.pc);
            Flow::Pause
        }
    }
}

/// PC = nnn
pub fn jmp_nnn(state: &mut State, instr: Instruction) -> Flow {
    state.pc = instr.nnn;
    Flow::Continue
}

/// STACK.push(PC); PC = nnn
pub fn call_nnn(state: &mut State, instr: Instruction) -> Flow {
    state.stack.push(state.pc);
    state.pc = instr.nnn;
    Flow::Continue
}

/// if Vx == nn then skip
pub fn se_vx_nn(state: &mut State, instr: Instruction) -> Flow {
    let condition = state.v[instr.x as usize] == instr.nn;
    skip_if(state, condition)
}

/// if Vx != nn then skip
pub fn sne_vx_nn(state: &mut State, instr: Instruction) -> Flow {
    let condition = state.v[instr.x as usize] != instr.nn;
    skip_if(state, condition)
}

/// if Vx == Vy then skip
pub fn se_vx_vy(state: &mut State, instr: Instruction) -> Flow {
    let condition = state.v[instr.x as usize] == state.v[instr.y as usize];
    skip_if(state, condition)
}

/// if Vx != Vy then skip
pub fn sne_vx_vy(state: &mut State, instr: Instruction) -> Flow {
    let condition = state.v[instr.x as usize] != state.v[instr.y as usize];
    skip_if(state, condition)
}

/// Vx = nn
pub fn mov_vx_nn(state: &mut State, instr: Instruction) -> Flow {
    state.v[instr.x as usize] = instr.nn;
    state.advance_pc();
    Flow::Continue
}

/// Vx += nn
/// Allow for overflow but implicitly drop it; VF is untouched
pub fn add_vx_nn(state: &mut State, instr: Instruction) -> Flow {
    let x = instr.x as usize;
    state.v[x] = state.v[x].wrapping_add(instr.nn);
    state.advance_pc();
    Flow::Continue
}

/// Vx = Vy
pub fn mov_vx_vy(state: &mut State, instr: Instruction) -> Flow {
    state.v[instr.x as usize] = state.v[instr.y as usize];
    state.advance_pc();
    Flow::Continue
}

/// Vx |= Vy
pub fn or_vx_vy(state: &mut State, instr: Instruction) -> Flow {
    state.v[instr.x as usize] |= state.v[instr.y as usize];
    state.advance_pc();
    Flow::Continue
}

/// Vx &= Vy
pub fn and_vx_vy(state: &mut State, instr: Instruction) -> Flow {
    state.v[instr.x as usize] &= state.v[instr.y as usize];
    state.advance_pc();
    Flow::Continue
}

/// Vx ^= Vy
pub fn xor_vx_vy(state: &mut State, instr: Instruction) -> Flow {
    state.v[instr.x as usize] ^= state.v[instr.y as usize];
    state.advance_pc();
    Flow::Continue
}

/// Vx += Vy; VF = overflow
pub fn add_vx_vy(state: &mut State, instr: Instruction) -> Flow {
    alu(state, instr, |vx, vy| vx.overflowing_add(vy))
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub_vx_vy(state: &mut State, instr: Instruction) -> Flow {
    alu_flag_first(state, instr, |vx, vy| (vx.wrapping_sub(vy), vx > vy))
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn_vx_vy(state: &mut State, instr: Instruction) -> Flow {
    alu_flag_first(state, instr, |vx, vy| (vy.wrapping_sub(vx), vy > vx))
}

/// Vx = Vy >> 1; VF = lsb(Vy)
/// The assembler writes the single-register form as Vy == Vx
pub fn shr_vx(state: &mut State, instr: Instruction) -> Flow {
    alu(state, instr, |_, vy| (vy >> 1, vy & 0x1 == 0x1))
}

/// Vx = Vy << 1; VF = msb(Vy)
pub fn shl_vx(state: &mut State, instr: Instruction) -> Flow {
    alu(state, instr, |_, vy| (vy << 1, vy & 0x80 == 0x80))
}

/// I = nnn
pub fn mov_i_nnn(state: &mut State, instr: Instruction) -> Flow {
    state.i = instr.nnn;
    state.advance_pc();
    Flow::Continue
}

/// PC = V0 + nnn
pub fn jmp_v0_nnn(state: &mut State, instr: Instruction) -> Flow {
    state.pc = instr.nnn + u16::from(state.v[0x0]);
    Flow::Continue
}

/// Vx = rand_byte & nn
pub fn rnd_vx_nn(state: &mut State, instr: Instruction) -> Flow {
    let rand_byte: u8 = rand::random();
    state.v[instr.x as usize] = rand_byte & instr.nn;
    state.advance_pc();
    Flow::Continue
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n-byte sprite at memory i.. onto the screen at (Vx, Vy), most significant bit
/// leftmost, wrapping at the edges. Sets VF if any pixels were erased
pub fn drw_vx_vy_n(state: &mut State, instr: Instruction) -> Flow {
    let origin_x = state.v[instr.x as usize] as usize;
    let origin_y = state.v[instr.y as usize] as usize;
    let mut erased = false;

    for row in 0..instr.n as usize {
        let byte = state.memory.read(state.i.wrapping_add(row as u16));
        for bit in 0..8 {
            if byte & (0x80 >> bit) != 0 {
                erased |= state.screen.flip(origin_x + bit, origin_y + row);
            }
        }
    }

    state.v[FLAG] = erased as u8;
    state.advance_pc();
    Flow::Continue
}

/// if key(Vx).pressed then skip
pub fn skp_vx(state: &mut State, instr: Instruction) -> Flow {
    let condition = state.input.is_key_pressed(state.v[instr.x as usize]);
    skip_if(state, condition)
}

/// if !key(Vx).pressed then skip
pub fn sknp_vx(state: &mut State, instr: Instruction) -> Flow {
    let condition = !state.input.is_key_pressed(state.v[instr.x as usize]);
    skip_if(state, condition)
}

/// Vx = DT
pub fn gdly_vx(state: &mut State, instr: Instruction) -> Flow {
    state.v[instr.x as usize] = state.timer.delay();
    state.advance_pc();
    Flow::Continue
}

/// await keypress for Vx
/// The PC stays put; it is advanced when the key press arrives
pub fn key_vx(state: &mut State, instr: Instruction) -> Flow {
    state.input.await_keypress(instr.x);
    Flow::Pause
}

/// DT = Vx
pub fn sdly_vx(state: &mut State, instr: Instruction) -> Flow {
    state.timer.set_delay(state.v[instr.x as usize]);
    state.advance_pc();
    Flow::Continue
}

/// ST = Vx
pub fn ssnd_vx(state: &mut State, instr: Instruction) -> Flow {
    state.timer.set_sound(state.v[instr.x as usize]);
    state.advance_pc();
    Flow::Continue
}

/// I += Vx; VF = overflow
pub fn add_i_vx(state: &mut State, instr: Instruction) -> Flow {
    let (sum, overflow) = state.i.overflowing_add(u16::from(state.v[instr.x as usize]));
    state.i = sum;
    state.v[FLAG] = overflow as u8;
    state.advance_pc();
    Flow::Continue
}

/// I = Vx * 5
/// Set I to the address of the font glyph for Vx; only 0x0..=0xF land on a glyph
pub fn font_vx(state: &mut State, instr: Instruction) -> Flow {
    let digit = u16::from(state.v[instr.x as usize]);
    state.i = digit * crate::constants::FONT_GLYPH_SIZE as u16;
    state.advance_pc();
    Flow::Continue
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd_vx(state: &mut State, instr: Instruction) -> Flow {
    let value = state.v[instr.x as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    for (offset, digit) in digits.iter().enumerate() {
        state.memory.write(state.i.wrapping_add(offset as u16), *digit);
    }
    state.advance_pc();
    Flow::Continue
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
pub fn str_v0_vx(state: &mut State, instr: Instruction) -> Flow {
    for reg in 0..=instr.x as usize {
        state.memory.write(state.i.wrapping_add(reg as u16), state.v[reg]);
    }
    state.i = state.i.wrapping_add(u16::from(instr.x) + 1);
    state.advance_pc();
    Flow::Continue
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
pub fn ld_v0_vx(state: &mut State, instr: Instruction) -> Flow {
    for reg in 0..=instr.x as usize {
        state.v[reg] = state.memory.read(state.i.wrapping_add(reg as u16));
    }
    state.i = state.i.wrapping_add(u16::from(instr.x) + 1);
    state.advance_pc();
    Flow::Continue
}

/// not an instruction; halt where we are
pub fn invalid(state: &mut State, instr: Instruction) -> Flow {
    log::error!(
        "invalid instruction {:#06X} at {:#05X}",
        instr.word(),
        state.pc
    );
    Flow::Pause
}

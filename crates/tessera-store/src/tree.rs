//! Shared 3-level tree storage used by the sparse bitset and word array.
//!
//! Layout: `level1[w1] -> area[w2] -> block[w3] -> u64 word`. Areas and
//! blocks are 32 entries each; unpopulated entries are `None` and cost no
//! memory. Level 1 grows geometrically: double until it holds the target
//! slot, then round up to the next power of two.
//!
//! The wire encoding walks the same tree: `u32 level1_len`, then per level-1
//! entry a presence byte, per present area 32 presence-prefixed blocks, each
//! block 32 big-endian `u64` words.

use std::io::{self, Read, Write};

pub(crate) const BLOCK_WORDS: usize = 32;
pub(crate) const AREA_BLOCKS: usize = 32;

/// Word-index decomposition shifts: `w3` takes the low 5 bits, `w2` the next
/// 5, `w1` the rest.
pub(crate) const SHIFT2: u32 = 5;
pub(crate) const SHIFT1: u32 = 10;
pub(crate) const MASK2: u32 = (AREA_BLOCKS - 1) as u32;
pub(crate) const MASK3: u32 = (BLOCK_WORDS - 1) as u32;

pub(crate) type Block = [u64; BLOCK_WORDS];
pub(crate) type Area = [Option<Box<Block>>; AREA_BLOCKS];
pub(crate) type Level1 = Vec<Option<Box<Area>>>;

#[inline]
pub(crate) fn split_word_index(word: u32) -> (usize, usize, usize) {
    (
        (word >> SHIFT1) as usize,
        ((word >> SHIFT2) & MASK2) as usize,
        (word & MASK3) as usize,
    )
}

/// Reads the word at `(w1, w2, w3)`; absent levels read as 0.
#[inline]
pub(crate) fn word(level1: &Level1, w1: usize, w2: usize, w3: usize) -> u64 {
    match level1.get(w1) {
        Some(Some(area)) => match &area[w2] {
            Some(block) => block[w3],
            None => 0,
        },
        _ => 0,
    }
}

/// Returns the word slot at `(w1, w2, w3)`, creating intermediate levels.
pub(crate) fn word_mut(level1: &mut Level1, w1: usize, w2: usize, w3: usize) -> &mut u64 {
    if w1 >= level1.len() {
        let new_len = (level1.len() * 2).max(w1 + 1).next_power_of_two();
        level1.resize_with(new_len, || None);
    }
    let area = level1[w1].get_or_insert_with(|| Box::new(Area::default()));
    let block = area[w2].get_or_insert_with(|| Box::new([0u64; BLOCK_WORDS]));
    &mut block[w3]
}

/// Rough resident size in bytes: pointer slots plus populated blocks.
pub(crate) fn memory_estimate(level1: &Level1) -> usize {
    let mut bytes = level1.len() * 8;
    for area in level1.iter().flatten() {
        bytes += AREA_BLOCKS * 8;
        bytes += area.iter().flatten().count() * BLOCK_WORDS * 8;
    }
    bytes
}

// ── Wire helpers ────────────────────────────────────────────────────────

pub(crate) fn write_u32(w: &mut impl Write, v: u32) -> io::Result<()> {
    w.write_all(&v.to_be_bytes())
}

pub(crate) fn read_u32(r: &mut impl Read) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn write_u64(w: &mut impl Write, v: u64) -> io::Result<()> {
    w.write_all(&v.to_be_bytes())
}

fn read_u64(r: &mut impl Read) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_be_bytes(buf))
}

fn write_bool(w: &mut impl Write, v: bool) -> io::Result<()> {
    w.write_all(&[u8::from(v)])
}

fn read_bool(r: &mut impl Read) -> io::Result<bool> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0] != 0)
}

pub(crate) fn write_tree(w: &mut impl Write, level1: &Level1) -> io::Result<()> {
    write_u32(w, level1.len() as u32)?;
    for entry in level1 {
        let Some(area) = entry else {
            write_bool(w, false)?;
            continue;
        };
        write_bool(w, true)?;
        for block in area.iter() {
            let Some(block) = block else {
                write_bool(w, false)?;
                continue;
            };
            write_bool(w, true)?;
            for &word in block.iter() {
                write_u64(w, word)?;
            }
        }
    }
    Ok(())
}

pub(crate) fn read_tree(r: &mut impl Read, max_level1_len: usize) -> io::Result<Level1> {
    let len = read_u32(r)? as usize;
    if len > max_level1_len {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("level-1 length {len} exceeds limit {max_level1_len}"),
        ));
    }
    let mut level1: Level1 = Vec::with_capacity(len);
    for _ in 0..len {
        if !read_bool(r)? {
            level1.push(None);
            continue;
        }
        let mut area = Box::new(Area::default());
        for slot in area.iter_mut() {
            if !read_bool(r)? {
                continue;
            }
            let mut block = Box::new([0u64; BLOCK_WORDS]);
            for word in block.iter_mut() {
                *word = read_u64(r)?;
            }
            *slot = Some(block);
        }
        level1.push(Some(area));
    }
    Ok(level1)
}

#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_render";
    fs::create_dir_all(dir).unwrap();

    // Minimal BMP 1x1 24-bit
    let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
    bmp[0] = b'B';
    bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&58u32.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&1i32.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&1i32.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[54] = 0xff; // BGR blue
    fs::write(format!("{dir}/bmp_1x1_24.bmp"), &bmp).unwrap();

    // Same geometry, top-down 32-bit
    let mut bmp32 = bmp.clone();
    bmp32[22..26].copy_from_slice(&(-1i32).to_le_bytes());
    bmp32[28..30].copy_from_slice(&32u16.to_le_bytes());
    fs::write(format!("{dir}/bmp_1x1_32_topdown.bmp"), &bmp32).unwrap();

    // 16-bit 565 (BI_BITFIELDS)
    let mut bmp16 = bmp.clone();
    bmp16[28..30].copy_from_slice(&16u16.to_le_bytes());
    bmp16[30..34].copy_from_slice(&3u32.to_le_bytes());
    bmp16[54] = 0xe0;
    bmp16[55] = 0x07; // pure green
    fs::write(format!("{dir}/bmp_1x1_565.bmp"), &bmp16).unwrap();

    // 1-bit with a two-entry color table
    let mut bmp1 = vec![0u8; 66]; // 54 header + 8 palette + 4 row
    bmp1[..54].copy_from_slice(&bmp[..54]);
    bmp1[2..6].copy_from_slice(&66u32.to_le_bytes());
    bmp1[10..14].copy_from_slice(&62u32.to_le_bytes());
    bmp1[28..30].copy_from_slice(&1u16.to_le_bytes());
    bmp1[54..58].copy_from_slice(&[0x00, 0x00, 0x00, 0x00]); // black
    bmp1[58..62].copy_from_slice(&[0xff, 0xff, 0xff, 0x00]); // white
    bmp1[62] = 0x80;
    fs::write(format!("{dir}/bmp_1x1_pal1.bmp"), &bmp1).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut cut = bmp.clone();
    cut.truncate(55);
    fs::write(format!("{dir}/bmp_cut_mid_pixel.bin"), &cut).unwrap();

    println!("Generated seed corpus in {dir}/");
}

use std::{env, fmt::Write as _, fs, path::PathBuf};

use sha2::{Digest, Sha256};

const INSTRUCTIONS: &[&str] = &[
    "start_lottery",
    "inject_funds",
    "buy_tickets",
    "close_lottery",
    "draw_final_number_and_make_lottery_claimable",
    "claim_tickets",
    "update_config",
    "transfer_operator",
];

fn discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

fn main() {
    let mut generated = String::new();
    for name in INSTRUCTIONS {
        let bytes = discriminator("global", name);
        writeln!(
            generated,
            "pub const IX_{}: [u8; 8] = {:?};",
            name.to_uppercase(),
            bytes
        )
        .expect("write to string");
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out_dir.join("discriminators.rs"), generated).expect("write discriminators.rs");
    println!("cargo:rerun-if-changed=build.rs");
}

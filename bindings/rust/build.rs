use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

fn main() -> Result<()> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let src_dir = manifest_dir.join("src");
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").context("OUT_DIR is not set")?);

    println!("cargo:rerun-if-changed={}", src_dir.display());
    println!("cargo:rerun-if-changed={}", src_dir.join("grammar.json").display());

    // A checked-in parser.c wins over generating one from grammar.json.
    let checked_in = src_dir.join("parser.c");
    let parser_path = if checked_in.exists() {
        println!("cargo:rerun-if-changed={}", checked_in.display());
        checked_in
    } else {
        generate_parser(&src_dir.join("grammar.json"), &out_dir)?
    };

    let header_dir = out_dir.join("tree_sitter");
    fs::create_dir_all(&header_dir)
        .with_context(|| format!("creating {}", header_dir.display()))?;
    fs::write(header_dir.join("parser.h"), tree_sitter::PARSER_HEADER)
        .context("writing tree_sitter/parser.h")?;

    let mut build = cc::Build::new();
    build
        .include(&out_dir)
        .include(&src_dir)
        .std("c11")
        .warnings(false)
        .flag_if_supported("-Wno-unused-parameter")
        .flag_if_supported("-Wno-unused-but-set-variable")
        .flag_if_supported("-Wno-trigraphs");

    build.file(&parser_path);

    let scanner_path = src_dir.join("scanner.c");
    if scanner_path.exists() {
        build.file(&scanner_path);
    }

    build.compile("tree-sitter-amble");
    Ok(())
}

fn generate_parser(grammar_path: &Path, out_dir: &Path) -> Result<PathBuf> {
    let grammar_json = fs::read_to_string(grammar_path)
        .with_context(|| format!("reading {}", grammar_path.display()))?;

    let (name, c_code) = tree_sitter_generate::generate_parser_for_grammar(&grammar_json)
        .with_context(|| format!("generating parser from {}", grammar_path.display()))?;
    if name != "amble" {
        bail!("{} describes grammar `{name}`, expected `amble`", grammar_path.display());
    }

    let parser_path = out_dir.join("parser.c");
    fs::write(&parser_path, c_code)
        .with_context(|| format!("writing {}", parser_path.display()))?;
    Ok(parser_path)
}

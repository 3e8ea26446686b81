//! Thin CLI front-end over [`llm_zip`]. Compresses or decompresses stdin
//! to stdout using the crate's bundled [`llm_zip::mock`] oracle — no real
//! LLM runtime is bundled (spec's peripheral, CLI-argument-parsing
//! concerns are not this crate's job); a caller who wants real model
//! weights behind the oracle swaps `MockOracle`/`MockTokenizer` for their
//! own `ModelOracle`/`Tokenizer` impls and links against the library
//! directly instead.

use std::io::{self, Read, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;

use llm_zip::driver::{CancellationToken, Compressor};
use llm_zip::mock::{MockOracle, MockTokenizer};
use llm_zip::model::ModelOracle;

#[derive(Parser, Debug)]
#[command(about = "Compress or decompress stdin using an LLM-driven arithmetic coder", long_about = None)]
struct Args {
    /// Decompress instead of compress.
    #[arg(short = 'd', long)]
    decompress: bool,

    /// Number of trailing tokens of prior context kept in the model's
    /// window at each step, either an absolute token count or a
    /// percentage of the model's max context length (e.g. "64%").
    #[arg(short = 'w', long, default_value = "50%")]
    window_overlap: String,

    /// Encode/decode the compressed bitstream as base64 rather than raw
    /// bytes, for passing it through text-only channels.
    #[arg(short = 'b', long)]
    base64: bool,
}

fn resolve_window_overlap(spec: &str, max_context_length: usize) -> Result<usize> {
    if let Some(pct) = spec.strip_suffix('%') {
        let pct: f64 = pct.parse().context("window-overlap percentage must be a number")?;
        if !(0.0..=100.0).contains(&pct) {
            bail!("window-overlap percentage must be between 0 and 100");
        }
        let ceiling = max_context_length.saturating_sub(1) as f64;
        Ok(((pct / 100.0) * ceiling).floor() as usize)
    } else {
        spec.parse().context("window-overlap must be an integer token count or a percentage like \"64%\"")
    }
}

fn read_stdin() -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf).context("reading stdin")?;
    Ok(buf)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let model = MockOracle;
    let tokenizer = MockTokenizer;
    let window_overlap = resolve_window_overlap(&args.window_overlap, model.max_context_length())?;
    let compressor = Compressor::new(&model, &tokenizer, window_overlap)?;
    let cancel = CancellationToken::new();

    let input = read_stdin()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.decompress {
        let compressed = if args.base64 {
            llm_zip::base64::robust_b64decode(&input).context("decoding base64 input")?
        } else {
            input
        };
        let plaintext = compressor.decompress(&compressed, &cancel)?;
        out.write_all(&plaintext)?;
    } else {
        let compressed = compressor.compress(&input, &cancel)?;
        if args.base64 {
            out.write_all(llm_zip::base64::b64encode(&compressed).as_bytes())?;
        } else {
            out.write_all(&compressed)?;
        }
    }

    Ok(())
}

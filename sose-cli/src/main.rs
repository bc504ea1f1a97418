//! Command-line front end of the `sose` stream cipher.
//!
//! ```text
//! sose encrypt encrypt_input.txt message.enc
//! sose decrypt decrypt_input.txt
//! sose vectors vector_inputs.txt test_data.txt
//! sose verify test_data.txt
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod errors;
mod input;
mod vectors;

use errors::{CliError, CliResult};
use input::{Mode, Payload, parse_params, printable};

/// Encrypt, decrypt and generate test vectors with the sose stream cipher.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt the plaintext of <INPUT> and write the ciphertext to <OUTPUT>
    Encrypt { input: PathBuf, output: PathBuf },
    /// Decrypt the ciphertext referenced by <INPUT>
    Decrypt {
        input: PathBuf,
        /// Write the recovered plaintext to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate test vectors from `plaintext|key|iv` lines
    Vectors { input: PathBuf, output: PathBuf },
    /// Recompute the vectors of a generated file and report PASS/FAIL
    Verify { input: PathBuf },
}

fn read(path: &Path) -> CliResult<Vec<u8>> {
    fs::read(path).map_err(|source| CliError::Io {
        path: path.to_owned(),
        source,
    })
}

fn read_text(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_owned(),
        source,
    })
}

fn write(path: &Path, data: &[u8]) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CliError::Io {
            path: parent.to_owned(),
            source,
        })?;
    }
    fs::write(path, data).map_err(|source| CliError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Run the cipher over `data` with a fresh state for `key` and `iv`.
fn crypt(key: &[u8], iv: &[u8], data: &[u8]) -> CliResult<Vec<u8>> {
    let mut state = sose::initialize(key, iv)?;
    let keystream = sose::generate_keystream(&mut state, data.len());
    Ok(sose::xor_encrypt(data, &keystream)?)
}

fn encrypt(input: &Path, output: &Path) -> CliResult<()> {
    let params = parse_params(&read_text(input)?, Mode::Encrypt)?;
    let Payload::Plaintext(plaintext) = params.payload else {
        return Err(CliError::MissingField("plaintext"));
    };

    println!("Encrypting {} bytes of plaintext...", plaintext.len());
    let ciphertext = crypt(&params.key, &params.iv, &plaintext)?;
    write(output, &ciphertext)?;

    println!("Ciphertext (hex): {}", hex::encode_upper(&ciphertext));
    println!("Encryption complete. Output written to: {}", output.display());
    Ok(())
}

fn decrypt(input: &Path, output: Option<&Path>) -> CliResult<()> {
    let params = parse_params(&read_text(input)?, Mode::Decrypt)?;
    let ciphertext = match params.payload {
        Payload::CiphertextHex(bytes) => bytes,
        Payload::CiphertextFile(path) => {
            // relative paths are taken from the input file's directory
            let path = match input.parent() {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path,
            };
            read(&path)?
        }
        Payload::Plaintext(_) => return Err(CliError::MissingField("ciphertext")),
    };

    println!("Decrypting {} bytes of ciphertext...", ciphertext.len());
    let recovered = crypt(&params.key, &params.iv, &ciphertext)?;
    match output {
        Some(path) => {
            write(path, &recovered)?;
            println!("Decryption complete. Output written to: {}", path.display());
        }
        None => println!("Recovered plaintext: {}", printable(&recovered)),
    }
    Ok(())
}

fn generate_vectors(input: &Path, output: &Path) -> CliResult<()> {
    let inputs = vectors::parse_vector_inputs(&read_text(input)?)?;
    println!("Found {} test inputs", inputs.len());

    let mut out = vectors::render_header(input);
    for vector in &inputs {
        out.push_str(&vectors::render_vector(vector)?);
        println!("Generated test vector for: \"{}\"", vector.plaintext);
    }
    write(output, out.as_bytes())?;

    println!("Wrote {} test vectors to {}", inputs.len(), output.display());
    Ok(())
}

/// Returns whether every vector of `input` passed.
fn verify_vectors(input: &Path) -> CliResult<bool> {
    let records = vectors::parse_vector_records(&read_text(input)?)?;
    println!("Found {} test vectors", records.len());

    let mut passed = 0;
    for (idx, record) in records.iter().enumerate() {
        let outcome = match vectors::check_vector(record) {
            Ok(verdict) => {
                if verdict.passed() {
                    passed += 1;
                }
                verdict.to_string()
            }
            Err(err) => format!("FAIL ({err})"),
        };
        println!("Vector {}: {outcome}: \"{}\"", idx + 1, record.plaintext);
    }

    println!("Summary: {passed}/{} vectors passed", records.len());
    Ok(passed == records.len())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Encrypt { input, output } => encrypt(input, output).map(|()| true),
        Commands::Decrypt { input, output } => decrypt(input, output.as_deref()).map(|()| true),
        Commands::Vectors { input, output } => generate_vectors(input, output).map(|()| true),
        Commands::Verify { input } => verify_vectors(input),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

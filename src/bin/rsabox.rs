//! rsabox CLI - RSA message encryption
//!
//! Command-line interface for generating an RSA key pair and encrypting
//! and decrypting short text messages with it. The private key is stored
//! PEM PKCS#8 encrypted under a passphrase; the public key as PEM SPKI.

use clap::{Parser, Subcommand};
use std::error::Error as StdError;
use std::path::{Path, PathBuf};
use std::process;

use rsabox::error::{ErrorKind, Result, RsaboxError};
use rsabox::file_ops;
use rsabox::passphrase::{PassphraseReader, ReaderPassphraseReader, TerminalPassphraseReader};

#[derive(Parser)]
#[command(name = "rsabox")]
#[command(version)]
#[command(about = "RSA message encryption with passphrase-protected keys.", long_about = None)]
struct Cli {
    /// Read passphrase from stdin instead of from terminal
    #[arg(long, global = true)]
    passphrase_stdin: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a key pair and store it in the filesystem.
    ///
    /// Prompts for a passphrase used to encrypt the private key at rest.
    /// Generating a 4096-bit key is CPU-bound and can take a while.
    #[command(alias = "g")]
    Generate {
        /// Directory to store the key pair in
        #[arg(short, long, value_name = "DIR", default_value = "keys")]
        keys_dir: PathBuf,
    },

    /// Encrypt a plaintext message with the stored public key
    #[command(alias = "e")]
    Encrypt {
        /// The plaintext message to encrypt
        #[arg(value_name = "MESSAGE")]
        message: String,

        /// Path to the public key
        #[arg(short, long, value_name = "FILE", default_value = "keys/publickey.pem")]
        key: PathBuf,

        /// Path to the file to write the base64 ciphertext to
        #[arg(short, long, value_name = "FILE", default_value = "encrypted-message.txt")]
        output: PathBuf,
    },

    /// Decrypt an encrypted message file with the stored private key
    #[command(alias = "d")]
    Decrypt {
        /// Path to the file containing the base64 ciphertext
        #[arg(short, long, value_name = "FILE", default_value = "encrypted-message.txt")]
        input: PathBuf,

        /// Path to the passphrase-encrypted private key
        #[arg(short, long, value_name = "FILE", default_value = "keys/privatekey.pem")]
        key: PathBuf,

        /// Path to the file to write the recovered plaintext to
        #[arg(short, long, value_name = "FILE", default_value = "decrypted-message.txt")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let passphrase_stdin = cli.passphrase_stdin;

    let result = match cli.command {
        Commands::Generate { keys_dir } => run_generate(&keys_dir, passphrase_stdin),
        Commands::Encrypt {
            message,
            key,
            output,
        } => run_encrypt(&key, &message, &output),
        Commands::Decrypt { input, key, output } => {
            run_decrypt(&key, &input, &output, passphrase_stdin)
        }
    };

    if let Err(err) = result {
        report_error(&err);
        process::exit(1);
    }
}

fn run_generate(keys_dir: &Path, passphrase_stdin: bool) -> Result<()> {
    let mut reader = get_passphrase_reader(passphrase_stdin);
    let keys = file_ops::generate_keys(keys_dir, &mut *reader)?;

    println!("Key pair generated successfully.");
    println!("Output: {}", keys.private_key_path.display());
    println!("Output: {}", keys.public_key_path.display());
    Ok(())
}

fn run_encrypt(key: &Path, message: &str, output: &Path) -> Result<()> {
    let armored = file_ops::encrypt_message(key, message, output).map_err(|e| {
        if e.kind == Some(ErrorKind::MissingInput) {
            e.with_context("no public key found; run 'rsabox generate' first")
        } else {
            e
        }
    })?;

    println!("Message encrypted successfully.");
    println!("Output: {}", output.display());
    println!();
    println!("{}", armored);
    Ok(())
}

fn run_decrypt(key: &Path, input: &Path, output: &Path, passphrase_stdin: bool) -> Result<()> {
    let mut reader = get_passphrase_reader(passphrase_stdin);
    let key_name = key.display().to_string();
    let plaintext =
        file_ops::decrypt_message(key, input, output, &mut *reader).map_err(|e| {
            if e.kind == Some(ErrorKind::MissingInput) {
                // The message names the missing path; pick the hint accordingly.
                if e.message().starts_with(&key_name) {
                    e.with_context("no private key found; run 'rsabox generate' first")
                } else {
                    e.with_context("no encrypted message found; run 'rsabox encrypt' first")
                }
            } else {
                e
            }
        })?;

    println!("Message decrypted successfully.");
    println!("Output: {}", output.display());
    println!();
    println!("{}", plaintext);
    Ok(())
}

fn get_passphrase_reader(use_stdin: bool) -> Box<dyn PassphraseReader> {
    if use_stdin {
        Box::new(ReaderPassphraseReader::new(Box::new(std::io::stdin())))
    } else {
        Box::new(TerminalPassphraseReader::new())
    }
}

fn report_error(err: &RsaboxError) {
    eprintln!("Error: {}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

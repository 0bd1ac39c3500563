use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser, ValueEnum};

use binarytext::ascii85;
use binarytext::base16;
use binarytext::base32;
use binarytext::base32hex;
use binarytext::base64;
use binarytext::base64url;
use binarytext::buffer::core::ByteBuffer;
use binarytext::common::io::read_file;
use binarytext::common::{self, io_error_msg};

const TOOL_NAME: &str = "binarytext";

#[derive(Parser)]
#[command(
    name = "binarytext",
    about = "Encode or decode data with the RFC 4648 codecs (Base16, Base32, \
        Base32Hex, Base64, Base64Url) or Ascii85.",
    after_help = "Text tasks treat the input as a string and print the result to stdout\n\
        (or --output-file). Binary tasks move raw bytes: --encode-binary reads the\n\
        input file byte-for-byte, and --decode-binary writes the decoded bytes to\n\
        --output-file, which is therefore required.\n\n\
        Base16 only:\n\
        \x20 --case=OPTION (lowercase, mixed, uppercase; mixed is decode-only)\n\n\
        Base32, Base32Hex, Base64 and Base64Url, encode tasks only:\n\
        \x20 --without-padding\n\n\
        Ascii85 only:\n\
        \x20 --fold-spaces\n\
        \x20 --adobe-mode",
    version
)]
#[command(group(
    ArgGroup::new("task")
        .required(true)
        .args(["encode_text", "encode_binary", "decode_text", "decode_binary"])
))]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["input_string", "input_file"])
))]
struct Cli {
    /// Encode a text input to an encoded string
    #[arg(long)]
    encode_text: bool,

    /// Encode a binary input file to an encoded string
    #[arg(long)]
    encode_binary: bool,

    /// Decode an encoded string to text
    #[arg(long)]
    decode_text: bool,

    /// Decode an encoded string to binary (requires --output-file)
    #[arg(long)]
    decode_binary: bool,

    /// Use the literal string as input
    #[arg(long, value_name = "STRING")]
    input_string: Option<String>,

    /// Read the input from this file
    #[arg(long, value_name = "PATH")]
    input_file: Option<PathBuf>,

    /// Write the output to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    output_file: Option<PathBuf>,

    /// Algorithm to use
    #[arg(long, value_enum, default_value = "base16")]
    algorithm: Algorithm,

    /// Letter case for the A-F digits (Base16 only)
    #[arg(long, value_enum)]
    case: Option<CaseOption>,

    /// Omit the trailing '=' characters when encoding
    #[arg(long)]
    without_padding: bool,

    /// Encode four consecutive spaces as 'y' (Ascii85 only)
    #[arg(long)]
    fold_spaces: bool,

    /// Wrap the output in <~ and ~> delimiters (Ascii85 only)
    #[arg(long)]
    adobe_mode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    Base16,
    Base32,
    #[value(name = "base32hex")]
    Base32Hex,
    Base64,
    #[value(name = "base64url")]
    Base64Url,
    Ascii85,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CaseOption {
    Lowercase,
    Mixed,
    Uppercase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    EncodeText,
    EncodeBinary,
    DecodeText,
    DecodeBinary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Text(String),
    File(PathBuf),
}

/// A fully validated invocation: every flag checked against the task and
/// algorithm, defaults filled in.
#[derive(Debug)]
struct Request {
    task: Task,
    algorithm: Algorithm,
    case: base16::Case,
    with_padding: bool,
    fold_spaces: bool,
    adobe_mode: bool,
    input: Input,
    output_file: Option<PathBuf>,
}

/// Cross-checks the parsed flags the way the clap groups cannot: option
/// values must be non-empty, per-algorithm options must be paired with
/// their algorithm, and mode restrictions (mixed-case encode, unpadded
/// decode) are rejected.
fn validate(cli: &Cli) -> Result<Request, String> {
    let task = if cli.encode_text {
        Task::EncodeText
    } else if cli.encode_binary {
        Task::EncodeBinary
    } else if cli.decode_text {
        Task::DecodeText
    } else if cli.decode_binary {
        Task::DecodeBinary
    } else {
        return Err("no task argument provided".into());
    };
    let is_encode = matches!(task, Task::EncodeText | Task::EncodeBinary);

    if let Some(value) = &cli.input_string {
        if value.is_empty() {
            return Err("empty value for --input-string".into());
        }
    }
    if let Some(path) = &cli.input_file {
        if path.as_os_str().is_empty() {
            return Err("empty value for --input-file".into());
        }
    }
    if let Some(path) = &cli.output_file {
        if path.as_os_str().is_empty() {
            return Err("empty value for --output-file".into());
        }
    }

    if task == Task::EncodeBinary && cli.input_string.is_some() {
        return Err("--encode-binary reads raw bytes, which requires --input-file".into());
    }
    if task == Task::DecodeBinary && cli.output_file.is_none() {
        return Err("--decode-binary requires --output-file".into());
    }

    match cli.algorithm {
        Algorithm::Base16 => {
            if cli.without_padding {
                return Err("--without-padding does not apply to base16".into());
            }
            if cli.fold_spaces {
                return Err("--fold-spaces only applies to ascii85".into());
            }
            if cli.adobe_mode {
                return Err("--adobe-mode only applies to ascii85".into());
            }
        }
        Algorithm::Base32 | Algorithm::Base32Hex | Algorithm::Base64 | Algorithm::Base64Url => {
            if cli.case.is_some() {
                return Err("--case only applies to base16".into());
            }
            if cli.fold_spaces {
                return Err("--fold-spaces only applies to ascii85".into());
            }
            if cli.adobe_mode {
                return Err("--adobe-mode only applies to ascii85".into());
            }
            if cli.without_padding && !is_encode {
                return Err("--without-padding only applies to encode tasks".into());
            }
        }
        Algorithm::Ascii85 => {
            if cli.case.is_some() {
                return Err("--case only applies to base16".into());
            }
            if cli.without_padding {
                return Err("--without-padding does not apply to ascii85".into());
            }
        }
    }

    let case = match cli.case {
        Some(CaseOption::Mixed) if is_encode => {
            return Err("--case=mixed only applies to decode tasks".into());
        }
        Some(CaseOption::Lowercase) => base16::Case::Lowercase,
        Some(CaseOption::Mixed) => base16::Case::Mixed,
        Some(CaseOption::Uppercase) => base16::Case::Uppercase,
        // Encoders emit uppercase by default; decoders accept either case.
        None if is_encode => base16::Case::Uppercase,
        None => base16::Case::Mixed,
    };

    let input = match (&cli.input_string, &cli.input_file) {
        (Some(value), None) => Input::Text(value.clone()),
        (None, Some(path)) => Input::File(path.clone()),
        _ => return Err("exactly one of --input-string and --input-file must be given".into()),
    };

    Ok(Request {
        task,
        algorithm: cli.algorithm,
        case,
        with_padding: !cli.without_padding,
        fold_spaces: cli.fold_spaces,
        adobe_mode: cli.adobe_mode,
        input,
        output_file: cli.output_file.clone(),
    })
}

/// Loads the text-mode input: the literal string, or the whole input file
/// as UTF-8 text.
fn text_input(input: &Input) -> Result<String, String> {
    match input {
        Input::Text(value) => Ok(value.clone()),
        Input::File(path) => {
            let data = read_file(path)
                .map_err(|e| format!("{}: {}", path.display(), io_error_msg(&e)))?;
            String::from_utf8(data.to_vec())
                .map_err(|_| format!("{}: input is not valid UTF-8 text", path.display()))
        }
    }
}

/// Writes text output to the chosen sink. Stdout gets a trailing newline;
/// a file receives the string verbatim.
fn write_text_output(output: &str, output_file: Option<&PathBuf>) -> Result<(), String> {
    match output_file {
        Some(path) => std::fs::write(path, output)
            .map_err(|e| format!("{}: {}", path.display(), io_error_msg(&e))),
        None => {
            println!("{}", output);
            Ok(())
        }
    }
}

fn run(request: &Request) -> Result<(), String> {
    match request.task {
        Task::EncodeText => {
            let input = text_input(&request.input)?;
            let encoded = match request.algorithm {
                Algorithm::Base16 => {
                    base16::encode_str(&input, request.case).map_err(|e| e.to_string())?
                }
                Algorithm::Base32 => {
                    base32::encode_str(&input, request.with_padding).map_err(|e| e.to_string())?
                }
                Algorithm::Base32Hex => base32hex::encode_str(&input, request.with_padding)
                    .map_err(|e| e.to_string())?,
                Algorithm::Base64 => {
                    base64::encode_str(&input, request.with_padding).map_err(|e| e.to_string())?
                }
                Algorithm::Base64Url => base64url::encode_str(&input, request.with_padding)
                    .map_err(|e| e.to_string())?,
                Algorithm::Ascii85 => {
                    ascii85::encode_str(&input, request.fold_spaces, request.adobe_mode)
                        .map_err(|e| e.to_string())?
                }
            };
            write_text_output(&encoded, request.output_file.as_ref())
        }
        Task::EncodeBinary => {
            let Input::File(path) = &request.input else {
                common::unreachable_terminate();
            };
            let buffer: ByteBuffer = ByteBuffer::from_file(path).map_err(|e| e.to_string())?;
            let encoded = match request.algorithm {
                Algorithm::Base16 => {
                    base16::encode_buffer(&buffer, request.case).map_err(|e| e.to_string())?
                }
                Algorithm::Base32 => base32::encode_buffer(&buffer, request.with_padding)
                    .map_err(|e| e.to_string())?,
                Algorithm::Base32Hex => base32hex::encode_buffer(&buffer, request.with_padding)
                    .map_err(|e| e.to_string())?,
                Algorithm::Base64 => base64::encode_buffer(&buffer, request.with_padding)
                    .map_err(|e| e.to_string())?,
                Algorithm::Base64Url => base64url::encode_buffer(&buffer, request.with_padding)
                    .map_err(|e| e.to_string())?,
                Algorithm::Ascii85 => {
                    ascii85::encode_buffer(&buffer, request.fold_spaces, request.adobe_mode)
                        .map_err(|e| e.to_string())?
                }
            };
            write_text_output(&encoded, request.output_file.as_ref())
        }
        Task::DecodeText => {
            let input = text_input(&request.input)?;
            let decoded = match request.algorithm {
                Algorithm::Base16 => {
                    base16::decode_to_string(&input, request.case).map_err(|e| e.to_string())?
                }
                Algorithm::Base32 => base32::decode_to_string(&input).map_err(|e| e.to_string())?,
                Algorithm::Base32Hex => {
                    base32hex::decode_to_string(&input).map_err(|e| e.to_string())?
                }
                Algorithm::Base64 => base64::decode_to_string(&input).map_err(|e| e.to_string())?,
                Algorithm::Base64Url => {
                    base64url::decode_to_string(&input).map_err(|e| e.to_string())?
                }
                Algorithm::Ascii85 => {
                    ascii85::decode_to_string(&input, request.fold_spaces, request.adobe_mode)
                        .map_err(|e| e.to_string())?
                }
            };
            write_text_output(&decoded, request.output_file.as_ref())
        }
        Task::DecodeBinary => {
            let input = text_input(&request.input)?;
            let buffer: ByteBuffer = match request.algorithm {
                Algorithm::Base16 => {
                    base16::decode_to_buffer(&input, request.case).map_err(|e| e.to_string())?
                }
                Algorithm::Base32 => base32::decode_to_buffer(&input).map_err(|e| e.to_string())?,
                Algorithm::Base32Hex => {
                    base32hex::decode_to_buffer(&input).map_err(|e| e.to_string())?
                }
                Algorithm::Base64 => base64::decode_to_buffer(&input).map_err(|e| e.to_string())?,
                Algorithm::Base64Url => {
                    base64url::decode_to_buffer(&input).map_err(|e| e.to_string())?
                }
                Algorithm::Ascii85 => {
                    ascii85::decode_to_buffer(&input, request.fold_spaces, request.adobe_mode)
                        .map_err(|e| e.to_string())?
                }
            };
            let Some(path) = &request.output_file else {
                common::unreachable_terminate();
            };
            buffer.write_to_file(path).map_err(|e| e.to_string())
        }
    }
}

fn main() {
    common::reset_sigpipe();

    let cli = Cli::parse();

    let request = match validate(&cli) {
        Ok(request) => request,
        Err(message) => {
            eprintln!("{}: {}", TOOL_NAME, message);
            process::exit(1);
        }
    };

    if let Err(message) = run(&request) {
        eprintln!("{}: {}", TOOL_NAME, message);
        process::exit(1);
    }
}

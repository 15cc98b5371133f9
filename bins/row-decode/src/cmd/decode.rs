use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use format_json::JsonFormat;
use row_api::{ErrorKind, FormatPlugin, RowDeserializer};

use crate::config::{DecodeArgs, DecoderConfig};
use crate::error::CliError;

/// Outcome counters of one decode run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub decoded: usize,
    pub skipped: usize,
    pub empty: usize,
}

pub fn run(args: DecodeArgs) -> Result<(), CliError> {
    let config = DecoderConfig::load(&args.config)?;
    tracing::info!(config = %args.config, topic = %config.topic, fields = config.schema.len(), "loaded config");

    let topic = config.topic;
    let format = JsonFormat::new(config.schema, config.json);
    let deserializer = format.deserializer();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| CliError::Config { context: "input", detail: format!("'{path}': {e}") })?;
            decode_lines(deserializer.as_ref(), &topic, BufReader::new(file), &mut out, args.fail_fast)?
        }
        None => decode_lines(deserializer.as_ref(), &topic, io::stdin().lock(), &mut out, args.fail_fast)?,
    };
    out.flush()?;

    tracing::info!(
        decoded = summary.decoded,
        skipped = summary.skipped,
        empty = summary.empty,
        "finished"
    );
    Ok(())
}

/// Decode one record per line and write each row as a JSON array line.
///
/// Blank lines carry no message. Bad records are skipped unless
/// `fail_fast`; errors of kind `Config` always stop the run since every
/// following record would fail the same way.
pub fn decode_lines<R: BufRead, W: Write>(
    deserializer: &dyn RowDeserializer,
    topic: &str,
    reader: R,
    out: &mut W,
    fail_fast: bool,
) -> Result<Summary, CliError> {
    let mut summary = Summary::default();

    // Raw bytes: invalid UTF-8 is a bad record for the deserializer, not an io error.
    for (index, line) in reader.split(b'\n').enumerate() {
        let line_no = index + 1;
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        let payload = (!line.trim_ascii().is_empty()).then_some(line.as_slice());

        match deserializer.deserialize(topic, payload) {
            Ok(Some(row)) => {
                serde_json::to_writer(&mut *out, &row)?;
                out.write_all(b"\n")?;
                summary.decoded += 1;
            }
            Ok(None) => summary.empty += 1,
            Err(e) if e.kind() == ErrorKind::Format && !fail_fast => {
                tracing::warn!(topic = %topic, line = line_no, error = %e, "bad record, skipping");
                summary.skipped += 1;
            }
            Err(e) => {
                tracing::error!(topic = %topic, line = line_no, error = %e, "decode error, stopping");
                return Err(CliError::Decode { line: line_no, source: e });
            }
        }
    }

    Ok(summary)
}

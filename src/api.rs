use crate::{
    boxes::BoxNode,
    config::ReaderConfig,
    error::ParseWarning,
    logger::{Logger, TracingLogger},
    reader::BoxReader,
    util::hex_dump,
};
use serde::Serialize;

/// Owned, JSON-serializable result of parsing one fragment buffer.
#[derive(Debug, Serialize)]
pub struct Analysis {
    /// Root boxes in stream order, each with its full subtree
    pub boxes: Vec<BoxNode>,
    /// Decoded text of the last `mdat` box, if any
    pub payload_text: Option<String>,
    /// Non-fatal issues met on the way (e.g. lossy payload decoding)
    pub warnings: Vec<ParseWarning>,
}

/// Parse `data` in one call, logging through `tracing` when `config.log` is set.
///
/// # Example
/// ```no_run
/// use fragbox::{analyze, ReaderConfig};
///
/// let data = std::fs::read("text0.mp4")?;
/// let analysis = analyze(&data, ReaderConfig::default())?;
/// println!("{}", serde_json::to_string_pretty(&analysis)?);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn analyze(data: &[u8], config: ReaderConfig) -> anyhow::Result<Analysis> {
    analyze_with_logger(data, config, TracingLogger)
}

pub fn analyze_with_logger<'a, L: Logger + 'a>(data: &'a [u8], config: ReaderConfig, logger: L) -> anyhow::Result<Analysis> {
    let mut reader = BoxReader::load(data).with_config(config).with_logger(logger);
    reader.parse()?;

    let report = reader.report();
    let payload_text = report.payload_text.map(str::to_owned);
    let warnings = report.warnings.to_vec();

    Ok(Analysis {
        boxes: reader.into_boxes(),
        payload_text,
        warnings,
    })
}

/// Result of a hex dump operation containing the formatted hex output.
#[derive(Debug, Serialize)]
pub struct HexDump {
    /// Starting offset of the dumped data
    pub offset: usize,
    /// Actual number of bytes that were dumped
    pub length: usize,
    /// Formatted hex dump string with addresses and ASCII representation
    pub hex: String,
}

/// Hex-dump a range of `data`.
///
/// Never reads past the end of the buffer; if `offset + max_len` goes beyond
/// it, the returned length is smaller than `max_len`.
pub fn hex_range(data: &[u8], offset: usize, max_len: usize) -> HexDump {
    let available = data.len().saturating_sub(offset);
    let to_read = available.min(max_len);

    if to_read == 0 {
        return HexDump {
            offset,
            length: 0,
            hex: String::new(),
        };
    }

    HexDump {
        offset,
        length: to_read,
        hex: hex_dump(&data[offset..offset + to_read], offset),
    }
}

use std::io;
use std::path::Path;
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

/// Loads `tokenizer.json` from a model directory (or an explicit tokenizer path).
pub fn load_tokenizer(model_path: &Path) -> io::Result<Tokenizer> {
    let tokenizer_path = if model_path.is_dir() {
        model_path.join("tokenizer.json")
    } else {
        model_path.to_path_buf()
    };

    Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)
}

/// Prepares a tokenizer for batched sentence embedding.
///
/// Inputs longer than `max_len` are truncated; shorter inputs in a batch are padded
/// to the longest one so the attention mask can exclude the padding from pooling.
pub fn configure_for_batches(tokenizer: &mut Tokenizer, max_len: usize) -> io::Result<()> {
    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;

    tokenizer.with_padding(Some(PaddingParams::default()));

    Ok(())
}

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::model::World;

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Flush the governance registries to JSONL files in the given directory.
///
/// This is the hand-off point to the persistence collaborator; the host
/// invokes it after decisions are applied, never on the resolution path.
/// Creates the output directory if it does not exist. Writes 4 files:
/// - `residents.jsonl` — one Resident per line
/// - `towns.jsonl` — one Town per line
/// - `nations.jsonl` — one Nation per line
/// - `plots.jsonl` — one Plot per line, permission groups inline
pub fn flush_to_jsonl(world: &World, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(
        &output_dir.join("residents.jsonl"),
        world.residents.values(),
    )?;
    write_jsonl(&output_dir.join("towns.jsonl"), world.towns.values())?;
    write_jsonl(&output_dir.join("nations.jsonl"), world.nations.values())?;
    write_jsonl(&output_dir.join("plots.jsonl"), world.plots.values())?;

    Ok(())
}

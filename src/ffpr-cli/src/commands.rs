//! Subcommand implementations.

use anyhow::{Context, Result};
use std::path::Path;

use ffpr::{transport, GameData, PrCipher, PrSave, SaveFormat};

use crate::file_io::{read_input, write_output};

pub fn decode(
    input: Option<&Path>,
    output: Option<&Path>,
    format: SaveFormat,
    pretty: bool,
) -> Result<()> {
    let raw = read_input(input)?;
    let cipher = PrCipher::new();
    let (plaintext, _) = transport::decode(&raw, format, &cipher).context("decoding save")?;

    let bytes = if pretty {
        let value: serde_json::Value =
            serde_json::from_slice(&plaintext).context("parsing decoded JSON")?;
        let mut pretty = serde_json::to_vec_pretty(&value)?;
        pretty.push(b'\n');
        pretty
    } else {
        plaintext
    };
    write_output(output, &bytes)
}

pub fn encode(input: Option<&Path>, output: Option<&Path>, format: SaveFormat) -> Result<()> {
    let plaintext = read_input(input)?;
    // Compact the JSON first so whitespace from hand editing does not
    // end up inside the save.
    let value: serde_json::Value =
        serde_json::from_slice(&plaintext).context("parsing input JSON")?;
    let compact = serde_json::to_vec(&value)?;

    let cipher = PrCipher::new();
    let raw = transport::encode(&compact, None, format, &cipher).context("encoding save")?;
    write_output(output, &raw)
}

fn format_play_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!(
        "{}:{:02}:{:02}",
        total / 3600,
        (total / 60) % 60,
        total % 60
    )
}

pub fn inspect(input: &Path, format: SaveFormat) -> Result<()> {
    let cipher = PrCipher::new();
    let data = GameData::builtin();
    let save = PrSave::load(input, format, &cipher, data)
        .with_context(|| format!("loading {}", input.display()))?;

    println!("gil:        {}", save.misc.gp);
    println!("steps:      {}", save.misc.steps);
    println!("battles:    {}", save.misc.battle_count);
    println!("play time:  {}", format_play_time(save.cheats.play_time));
    println!("map:        {} (point {})", save.map.map_id, save.map.point_in);
    println!("espers:     {}", save.espers.unlocked.len());
    println!(
        "items:      {} normal, {} key",
        save.inventory.occupied().count(),
        save.key_items.occupied().count()
    );

    println!("party:");
    for (slot, &character_id) in save.party.slots.iter().enumerate() {
        if character_id == 0 {
            continue;
        }
        let name = save
            .party
            .possible
            .iter()
            .find(|m| m.character_id == character_id)
            .map(|m| m.name.as_str())
            .unwrap_or("?");
        println!("  {}: {name}", slot + 1);
    }

    println!("characters:");
    for character in save.characters.iter().flatten() {
        println!(
            "  {:10} lv {:3}  hp {}/{}  mp {}/{}",
            character.name,
            character.level,
            character.hp.current,
            character.hp.max,
            character.mp.current,
            character.mp.max
        );
    }

    for vehicle in &save.transportation {
        if vehicle.enabled {
            println!("vehicle {} on map {}", vehicle.id, vehicle.map_id);
        }
    }
    Ok(())
}

use huffpack::{decode_from_readers, encode_with, Config, TableFormat};
use std::env;
use std::fs::{self, File};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let fp = env::args()
        .nth(1)
        .ok_or("Please provide path to input file as first argument.")?;
    let config = match env::args().nth(2).as_deref() {
        Some("--binary") => Config::binary(),
        _ => Config::default(),
    };

    let input_bytes = fs::read(&fp)?;

    let huff_path = format!("{fp}.huff");
    let codes_path = format!("{fp}.codes");
    let decoded_path = format!("{fp}.decoded");

    // encode scope - save payload and table
    {
        let encoded = encode_with(&config, &input_bytes)?;
        encoded.write_to(File::create(&huff_path)?, File::create(&codes_path)?)?;

        println!(
            "{} bytes -> {} byte payload + {} byte {} table",
            input_bytes.len(),
            encoded.payload.len(),
            encoded.table.len(),
            match config.table_format {
                TableFormat::Text => "text",
                TableFormat::Binary => "binary",
            }
        );
    }

    // decode scope - read both back
    {
        let decoded =
            decode_from_readers(&config, File::open(&huff_path)?, File::open(&codes_path)?)?;
        fs::write(&decoded_path, &decoded)?;

        if decoded != input_bytes {
            return Err("decoded output differs from input".into());
        }
        println!("round trip ok, wrote {decoded_path}");
    }

    Ok(())
}

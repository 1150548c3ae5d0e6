use std::error::Error;

use log::info;
use qrforge::{BitStream, ECLevel, QRBuilder, Version};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Byte mode segment for "Hello, world!" with terminator
    let mut data = BitStream::new();
    let msg = "Hello, world!";
    data.push_bits(0b0100, 4);
    data.push_bits(msg.len() as u32, 8);
    data.extend(msg.as_bytes());
    data.push_bits(0, 4);

    let qr = QRBuilder::new(&data, Version::new(3)?).ec_level(ECLevel::H).build()?;
    info!("Masked with pattern {:?}", qr.mask());
    println!("{}", qr.to_str(1));

    Ok(())
}

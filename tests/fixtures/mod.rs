//! Image bytes and backend records for flow tests

use serde_json::{json, Value};

pub const ONE_MB: usize = 1024 * 1024;

pub const SELLER_ID: &str = "seller-42";

pub const LISTING_ROUTE: &str = "/myproducts";

/// JPEG magic followed by zero padding up to `size` bytes.
pub fn jpeg_bytes(size: usize) -> Vec<u8> {
    padded(&[0xFF, 0xD8, 0xFF, 0xE0], size)
}

pub fn png_bytes(size: usize) -> Vec<u8> {
    padded(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A], size)
}

pub fn gif_bytes(size: usize) -> Vec<u8> {
    padded(b"GIF89a", size)
}

fn padded(magic: &[u8], size: usize) -> Vec<u8> {
    let mut bytes = magic.to_vec();
    bytes.resize(size.max(magic.len()), 0);
    bytes
}

pub fn categories() -> Value {
    json!([
        { "catid": 1, "catname": "Shoes" },
        { "catid": 2, "catname": "Bags" },
        { "catid": 3, "catname": "Watches" }
    ])
}

/// Stored product 7, as the backend returns it (numeric columns as numbers).
pub fn shoe_record() -> Value {
    json!({
        "pname": "Trail Shoe",
        "pcat": 1,
        "price": 80,
        "qty": 4,
        "descr": "Waterproof trail runner",
        "photo": "trail-shoe.jpg"
    })
}

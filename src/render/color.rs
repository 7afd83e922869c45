/// Stable `#rrggbb` colour for a category name.
///
/// Hashes UTF-16 code units with `h = c + (h << 5) - h` in wrapping 32-bit arithmetic and takes
/// the three low bytes, least significant first.
pub fn string_to_colour(name: &str) -> String {
    let hash = name
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            i32::from(unit)
                .wrapping_add(hash.wrapping_shl(5))
                .wrapping_sub(hash)
        });

    let mut colour = String::with_capacity(7);
    colour.push('#');
    for i in 0..3 {
        let value = (hash >> (i * 8)) & 0xFF;
        colour.push_str(&format!("{value:02x}"));
    }
    colour
}

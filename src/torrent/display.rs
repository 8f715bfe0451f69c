/// Format a byte count for humans, 1024-based
pub fn format_size(size: u64) -> String {
    if size < 1024 {
        return format!("{} B", size);
    }

    // Unit index is floor(log1024(size)), taken from the bit length
    let exp = ((63 - size.leading_zeros()) / 10) as usize;
    const UNITS: [char; 7] = [' ', 'K', 'M', 'G', 'T', 'P', 'E'];

    let scaled = size as f64 / (1u64 << (exp * 10)) as f64;
    format!("{:.1} {}B", scaled, UNITS[exp])
}

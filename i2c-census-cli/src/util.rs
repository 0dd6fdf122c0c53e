use i2c_census::scan::{FIRST_SCAN_ADDRESS, LAST_SCAN_ADDRESS};

/// A simulated device given on the command line.
#[derive(Debug, Clone)]
pub(crate) struct DeviceSpec {
    pub(crate) address: u8,
    pub(crate) registers: Vec<(u8, u8)>,
}

/// Parse a hex byte, with or without a leading `0x`.
pub(crate) fn byte_from_hex(text: &str) -> Result<u8, String> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u8::from_str_radix(digits, 16).map_err(|err| format!("'{text}' is not a hex byte: {err}"))
}

/// Parse a scannable 7-bit bus address written in hex.
pub(crate) fn address_from_hex(text: &str) -> Result<u8, String> {
    let address = byte_from_hex(text)?;
    if !(FIRST_SCAN_ADDRESS..=LAST_SCAN_ADDRESS).contains(&address) {
        return Err(format!(
            "address 0x{address:02X} is outside the scannable range 0x{FIRST_SCAN_ADDRESS:02X}-0x{LAST_SCAN_ADDRESS:02X}"
        ));
    }
    Ok(address)
}

/// Parse a device spec: `ADDR` or `ADDR=REG:VAL,REG:VAL` (all hex).
pub(crate) fn device_spec(text: &str) -> Result<DeviceSpec, String> {
    let (address_part, register_part) = match text.split_once('=') {
        Some((address, registers)) => (address, Some(registers)),
        None => (text, None),
    };
    let address = address_from_hex(address_part)?;

    let mut registers = Vec::new();
    if let Some(register_part) = register_part {
        for pair in register_part.split(',') {
            let (register, value) = pair
                .split_once(':')
                .ok_or_else(|| format!("register spec '{pair}' is not REG:VAL"))?;
            registers.push((byte_from_hex(register)?, byte_from_hex(value)?));
        }
    }
    Ok(DeviceSpec { address, registers })
}

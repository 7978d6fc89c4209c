use crate::SnowflakeId;
use core::fmt;

struct FieldLayout {
    name: &'static str,
    bits: u8,
    value: i64,
}

fn fields(id: &SnowflakeId) -> [FieldLayout; 5] {
    [
        FieldLayout {
            name: "reserved",
            bits: 1,
            value: i64::from(id.to_raw() < 0),
        },
        FieldLayout {
            name: "timestamp",
            bits: 41,
            value: id.timestamp(),
        },
        FieldLayout {
            name: "datacenter_id",
            bits: 5,
            value: id.datacenter_id(),
        },
        FieldLayout {
            name: "worker_id",
            bits: 5,
            value: id.worker_id(),
        },
        FieldLayout {
            name: "sequence",
            bits: 12,
            value: id.sequence(),
        },
    ]
}

fn center(s: impl ToString, width: usize) -> String {
    let s = s.to_string();
    let len = s.len();
    if len >= width {
        return s;
    }
    let pad = width - len;
    let left = pad / 2;
    let right = pad - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

fn write_border(f: &mut fmt::Formatter<'_>, columns: &[usize]) -> fmt::Result {
    write!(f, "        +")?;
    for &w in columns {
        write!(f, "{}+", "-".repeat(w))?;
    }
    writeln!(f)
}

/// Renders the raw value, its common encodings and a table of the bit fields.
pub(crate) fn write_bit_layout_debug(f: &mut fmt::Formatter<'_>, id: &SnowflakeId) -> fmt::Result {
    let fields = fields(id);

    // Max width per column: label, dec, hex
    let columns: Vec<usize> = fields
        .iter()
        .map(|field| {
            let label_len = format!("{} ({})", field.name, field.bits).len();
            let dec_len = field.value.to_string().len();
            let hex_len = format!("0x{:x}", field.value).len();
            label_len.max(dec_len).max(hex_len) + 2
        })
        .collect();

    writeln!(f, "SnowflakeId {{")?;
    writeln!(f, "    raw id     : 0x{:016x} ({})", id.to_raw(), id.to_raw())?;
    writeln!(f, "    base32     : {}", id.base32())?;
    writeln!(f, "    base58     : {}", id.base58())?;
    writeln!(f, "    layout     :")?;

    write_border(f, &columns)?;

    write!(f, "        |")?;
    for (field, &w) in fields.iter().zip(&columns) {
        let label = format!("{} ({})", field.name, field.bits);
        write!(f, "{}|", center(label, w))?;
    }
    writeln!(f)?;

    write_border(f, &columns)?;

    write!(f, "        |")?;
    for (field, &w) in fields.iter().zip(&columns) {
        write!(f, "{}|", center(field.value, w))?;
    }
    writeln!(f)?;

    write!(f, "        |")?;
    for (field, &w) in fields.iter().zip(&columns) {
        write!(f, "{}|", center(format!("0x{:x}", field.value), w))?;
    }
    writeln!(f)?;

    write_border(f, &columns)?;

    write!(f, "}}")
}

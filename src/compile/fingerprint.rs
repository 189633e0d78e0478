use serde::Serialize;

use crate::foundation::error::LyricResult;
use crate::foundation::math::Fnv1a64;

const SEED_HI: u64 = Fnv1a64::OFFSET_BASIS;
const SEED_LO: u64 = 0x9ae1_6a3b_2f90_404f;

/// 128-bit digest built from two independently seeded FNV-1a streams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SceneFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl SceneFingerprint {
    pub fn to_hex(self) -> String {
        format!("{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Digest any serializable value through its JSON form, with object keys sorted so map
/// ordering never leaks into the result.
pub fn fingerprint_of<T: Serialize + ?Sized>(value: &T) -> LyricResult<SceneFingerprint> {
    let v = serde_json::to_value(value)?;
    Ok(fingerprint_json(&v))
}

pub fn fingerprint_json(v: &serde_json::Value) -> SceneFingerprint {
    let mut a = Fnv1a64::new(SEED_HI);
    let mut b = Fnv1a64::new(SEED_LO);
    write_json_value_pair(&mut a, &mut b, v);
    SceneFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_json_value_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: &serde_json::Value) {
    match v {
        serde_json::Value::Null => write_u8_pair(a, b, 0),
        serde_json::Value::Bool(x) => {
            write_u8_pair(a, b, 1);
            write_u8_pair(a, b, u8::from(*x));
        }
        serde_json::Value::Number(n) => {
            write_u8_pair(a, b, 2);
            if let Some(i) = n.as_i64() {
                write_u8_pair(a, b, 0);
                write_u64_pair(a, b, i as u64);
            } else if let Some(u) = n.as_u64() {
                write_u8_pair(a, b, 1);
                write_u64_pair(a, b, u);
            } else if let Some(f) = n.as_f64() {
                write_u8_pair(a, b, 2);
                write_u64_pair(a, b, f.to_bits());
            } else {
                write_u8_pair(a, b, 3);
                write_str_pair(a, b, &n.to_string());
            }
        }
        serde_json::Value::String(s) => {
            write_u8_pair(a, b, 3);
            write_str_pair(a, b, s);
        }
        serde_json::Value::Array(items) => {
            write_u8_pair(a, b, 4);
            write_u64_pair(a, b, items.len() as u64);
            for item in items {
                write_json_value_pair(a, b, item);
            }
        }
        serde_json::Value::Object(map) => {
            write_u8_pair(a, b, 5);
            let mut keys = map.keys().collect::<Vec<_>>();
            keys.sort_unstable();
            write_u64_pair(a, b, keys.len() as u64);
            for k in keys {
                write_str_pair(a, b, k);
                write_json_value_pair(a, b, &map[k]);
            }
        }
    }
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    write_u64_pair(a, b, s.len() as u64);
    a.write_bytes(s.as_bytes());
    b.write_bytes(s.as_bytes());
}

//! Audio and subtitle stream descriptors.
//!
//! omxplayer reports each track of `ListAudio` / `ListSubtitles` as one string:
//!
//! ```text
//! <index>:<language>:<name>:<codec>:<active|"">
//! ```
//!
//! The name is free text and may itself contain `:`. Index and language are
//! taken from the front, codec and flag from the back, and whatever is left in
//! between is the name.

use std::fmt;

use serde::{Deserialize, Serialize};

const DELIMITER: char = ':';
const ACTIVE_FLAG: &str = "active";

/// One selectable audio or subtitle track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
  pub index: u32,
  #[serde(rename = "lang")]
  pub language: String,
  pub name: String,
  pub codec: String,
  pub active: bool,
}

impl StreamDescriptor {
  /// Parse one descriptor string. Never fails: a bad index reads as 0 and any
  /// flag other than `active` reads as inactive.
  pub fn parse(raw: &str) -> Self {
    let mut head = raw.splitn(3, DELIMITER);
    let index = head.next().unwrap_or_default().parse().unwrap_or(0);
    let language = head.next().unwrap_or_default();
    let rest = head.next().unwrap_or_default();

    // rsplitn yields flag, codec, name.
    let tail: Vec<&str> = rest.rsplitn(3, DELIMITER).collect();
    let (name, codec, flag) = match tail.as_slice() {
      [flag, codec, name] => (*name, *codec, *flag),
      [flag, codec] => ("", *codec, *flag),
      [name] => (*name, "", ""),
      _ => ("", "", ""),
    };

    Self {
      index,
      language: language.to_string(),
      name: name.to_string(),
      codec: codec.to_string(),
      active: flag == ACTIVE_FLAG,
    }
  }
}

impl From<&str> for StreamDescriptor {
  fn from(raw: &str) -> Self {
    Self::parse(raw)
  }
}

/// Writes the descriptor back in the player's wire format.
impl fmt::Display for StreamDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{index}{d}{language}{d}{name}{d}{codec}{d}{flag}",
      index = self.index,
      language = self.language,
      name = self.name,
      codec = self.codec,
      flag = if self.active { ACTIVE_FLAG } else { "" },
      d = DELIMITER,
    )
  }
}

/// Parse every raw descriptor of a track listing, preserving order.
pub fn parse_streams<S: AsRef<str>>(raw: &[S]) -> Vec<StreamDescriptor> {
  raw.iter().map(|s| StreamDescriptor::from(s.as_ref())).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_active_track() {
    let stream = StreamDescriptor::parse("2:eng:English:aac:active");
    assert_eq!(
      stream,
      StreamDescriptor {
        index: 2,
        language: "eng".into(),
        name: "English".into(),
        codec: "aac".into(),
        active: true,
      }
    );
  }

  #[test]
  fn test_parse_inactive_track() {
    let stream = StreamDescriptor::parse("1:fre:Francais:ac3:");
    assert_eq!(stream.index, 1);
    assert_eq!(stream.language, "fre");
    assert_eq!(stream.name, "Francais");
    assert_eq!(stream.codec, "ac3");
    assert!(!stream.active);
  }

  #[test]
  fn test_parse_short_descriptor_with_empty_fields() {
    let stream = StreamDescriptor::parse("0:::,");
    assert_eq!(stream, StreamDescriptor::default());
  }

  #[test]
  fn test_name_keeps_embedded_delimiters() {
    let stream = StreamDescriptor::parse("3:eng:Director's Cut: Commentary 2:dts:active");
    assert_eq!(stream.index, 3);
    assert_eq!(stream.language, "eng");
    assert_eq!(stream.name, "Director's Cut: Commentary 2");
    assert_eq!(stream.codec, "dts");
    assert!(stream.active);
  }

  #[test]
  fn test_bad_index_reads_as_zero() {
    assert_eq!(StreamDescriptor::parse("x:eng:English:aac:").index, 0);
    assert_eq!(StreamDescriptor::parse("-4:eng:English:aac:").index, 0);
    assert_eq!(StreamDescriptor::parse(":eng:English:aac:").index, 0);
  }

  #[test]
  fn test_flag_must_match_exactly() {
    for flag in ["Active", "active ", "inactive", "1", ""] {
      let raw = format!("0:eng:English:aac:{}", flag);
      assert!(!StreamDescriptor::parse(&raw).active, "{:?}", flag);
    }
  }

  #[test]
  fn test_degenerate_inputs_do_not_panic() {
    for raw in ["", ":", "::", "7", "7:eng", "7:eng:name", "::::::::"] {
      let _ = StreamDescriptor::parse(raw);
    }
    let stream = StreamDescriptor::parse("7:eng:name");
    assert_eq!(stream.index, 7);
    assert_eq!(stream.name, "name");
    assert_eq!(stream.codec, "");
  }

  #[test]
  fn test_display_reproduces_five_token_descriptors() {
    let indices = [0u32, 1, 12, 4294967295];
    let languages = ["", "eng", "pt-BR", "und"];
    let names = ["", "English", "Deutsch 5.1", "Commentary: Director"];
    let codecs = ["", "aac", "eac3", "dvb_subtitle"];
    let flags = ["", "active"];

    let mut checked = 0;
    for index in indices {
      for language in languages {
        for name in names {
          for codec in codecs {
            for flag in flags {
              let raw = format!("{}:{}:{}:{}:{}", index, language, name, codec, flag);
              let stream = StreamDescriptor::parse(&raw);
              assert_eq!(stream.index, index, "{}", raw);
              assert_eq!(stream.language, language, "{}", raw);
              assert_eq!(stream.name, name, "{}", raw);
              assert_eq!(stream.codec, codec, "{}", raw);
              assert_eq!(stream.active, flag == "active", "{}", raw);
              assert_eq!(stream.to_string(), raw);
              checked += 1;
            }
          }
        }
      }
    }
    assert_eq!(checked, 4 * 4 * 4 * 4 * 2);
  }

  #[test]
  fn test_parse_streams_preserves_order() {
    let streams = parse_streams(&["0:eng:English:aac:active", "1:ger:Deutsch:ac3:"]);
    assert_eq!(streams.len(), 2);
    assert_eq!(streams[0].language, "eng");
    assert_eq!(streams[1].language, "ger");
    assert!(parse_streams::<&str>(&[]).is_empty());
  }

  #[test]
  fn test_serializes_with_short_language_key() {
    let json = serde_json::to_value(StreamDescriptor::parse("2:eng:English:aac:active")).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "index": 2,
        "lang": "eng",
        "name": "English",
        "codec": "aac",
        "active": true
      })
    );
  }
}

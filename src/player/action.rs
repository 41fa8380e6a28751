//! Keyboard actions accepted by omxplayer's `Action` method.
//!
//! The discriminants are the codes omxplayer's key handler expects and must
//! stay as they are.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum KeyboardAction {
  DecreaseSpeed = 1,
  IncreaseSpeed = 2,
  Rewind = 3,
  FastForward = 4,
  ShowInfo = 5,
  PreviousAudio = 6,
  NextAudio = 7,
  PreviousChapter = 8,
  NextChapter = 9,
  PreviousSubtitle = 10,
  NextSubtitle = 11,
  ToggleSubtitle = 12,
  DecreaseSubtitleDelay = 13,
  IncreaseSubtitleDelay = 14,
  Exit = 15,
  PlayPause = 16,
  DecreaseVolume = 17,
  IncreaseVolume = 18,
  SeekBackSmall = 19,
  SeekForwardSmall = 20,
  SeekBackLarge = 21,
  SeekForwardLarge = 22,
  Step = 23,
  Blank = 24,
  SeekRelative = 25,
  SeekAbsolute = 26,
  MoveVideo = 27,
  HideVideo = 28,
  UnhideVideo = 29,
  HideSubtitles = 30,
  ShowSubtitles = 31,
  SetAlpha = 32,
  SetAspectMode = 33,
  CropVideo = 34,
  Pause = 35,
  Play = 36,
}

impl KeyboardAction {
  /// Every action, in code order.
  pub const ALL: [KeyboardAction; 36] = [
    KeyboardAction::DecreaseSpeed,
    KeyboardAction::IncreaseSpeed,
    KeyboardAction::Rewind,
    KeyboardAction::FastForward,
    KeyboardAction::ShowInfo,
    KeyboardAction::PreviousAudio,
    KeyboardAction::NextAudio,
    KeyboardAction::PreviousChapter,
    KeyboardAction::NextChapter,
    KeyboardAction::PreviousSubtitle,
    KeyboardAction::NextSubtitle,
    KeyboardAction::ToggleSubtitle,
    KeyboardAction::DecreaseSubtitleDelay,
    KeyboardAction::IncreaseSubtitleDelay,
    KeyboardAction::Exit,
    KeyboardAction::PlayPause,
    KeyboardAction::DecreaseVolume,
    KeyboardAction::IncreaseVolume,
    KeyboardAction::SeekBackSmall,
    KeyboardAction::SeekForwardSmall,
    KeyboardAction::SeekBackLarge,
    KeyboardAction::SeekForwardLarge,
    KeyboardAction::Step,
    KeyboardAction::Blank,
    KeyboardAction::SeekRelative,
    KeyboardAction::SeekAbsolute,
    KeyboardAction::MoveVideo,
    KeyboardAction::HideVideo,
    KeyboardAction::UnhideVideo,
    KeyboardAction::HideSubtitles,
    KeyboardAction::ShowSubtitles,
    KeyboardAction::SetAlpha,
    KeyboardAction::SetAspectMode,
    KeyboardAction::CropVideo,
    KeyboardAction::Pause,
    KeyboardAction::Play,
  ];

  /// Wire code sent as the `Action` argument.
  pub fn code(self) -> i32 {
    self as i32
  }
}

impl From<KeyboardAction> for i32 {
  fn from(action: KeyboardAction) -> Self {
    action.code()
  }
}

impl TryFrom<i32> for KeyboardAction {
  type Error = i32;

  fn try_from(code: i32) -> Result<Self, Self::Error> {
    code
      .checked_sub(1)
      .and_then(|i| usize::try_from(i).ok())
      .and_then(|i| Self::ALL.get(i).copied())
      .ok_or(code)
  }
}

impl fmt::Display for KeyboardAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}({})", self, self.code())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_codes_are_contiguous_from_one() {
    for (i, action) in KeyboardAction::ALL.iter().enumerate() {
      assert_eq!(action.code(), i as i32 + 1, "{:?}", action);
    }
  }

  #[test]
  fn test_known_codes() {
    assert_eq!(KeyboardAction::DecreaseSpeed.code(), 1);
    assert_eq!(KeyboardAction::Exit.code(), 15);
    assert_eq!(KeyboardAction::PlayPause.code(), 16);
    assert_eq!(KeyboardAction::ShowSubtitles.code(), 31);
    assert_eq!(KeyboardAction::Play.code(), 36);
  }

  #[test]
  fn test_try_from_code() {
    assert_eq!(KeyboardAction::try_from(3), Ok(KeyboardAction::Rewind));
    assert_eq!(KeyboardAction::try_from(35), Ok(KeyboardAction::Pause));
    assert_eq!(KeyboardAction::try_from(0), Err(0));
    assert_eq!(KeyboardAction::try_from(37), Err(37));
    assert_eq!(KeyboardAction::try_from(i32::MIN), Err(i32::MIN));
  }

  #[test]
  fn test_display() {
    assert_eq!(KeyboardAction::NextChapter.to_string(), "NextChapter(9)");
  }
}

use glam::Vec3;
use uproar_core::types::SoundHandle;

/// Host audio backend. Receives one call per admitted event.
pub trait PlaybackSink {
    fn play_sound_at_location(&mut self, sound: &SoundHandle, location: Vec3, volume: f32);
}

/// A recorded playback call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRequest {
    pub sound: SoundHandle,
    pub location: Vec3,
    pub volume: f32,
}

impl PlaybackSink for Vec<PlaybackRequest> {
    fn play_sound_at_location(&mut self, sound: &SoundHandle, location: Vec3, volume: f32) {
        self.push(PlaybackRequest {
            sound: sound.clone(),
            location,
            volume,
        });
    }
}

/// Discards every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPlayback;

impl PlaybackSink for NullPlayback {
    fn play_sound_at_location(&mut self, _sound: &SoundHandle, _location: Vec3, _volume: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_records_requests() {
        let mut sink: Vec<PlaybackRequest> = Vec::new();
        let sound = SoundHandle::new("impact/a");
        sink.play_sound_at_location(&sound, Vec3::X, 0.5);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].sound, sound);
        assert_eq!(sink[0].location, Vec3::X);
        assert!((sink[0].volume - 0.5).abs() < f32::EPSILON);
    }
}

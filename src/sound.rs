use anyhow::Result;
use bevy_ecs::system::Resource;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use crossbeam_channel::{Receiver, Sender, bounded};
use fundsp::hacker32::*;
use std::thread;

// Sound effects types that can be played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Swipe,
    CorrectMatch,
    WrongMatch,
    ColorUnlock,
    GameOver,
}

// Command to control the audio thread
enum AudioCommand {
    PlaySound(SoundEffect),
    PlayMusic(bool), // true to start, false to stop
    SetVolume(f32),  // 0.0 to 1.0
}

/// Handle to the audio thread. Constructed once and injected as a resource;
/// every call is a non-blocking channel send.
#[derive(Resource)]
pub struct AudioState {
    sender: Option<Sender<AudioCommand>>,
    music_enabled: bool,
    sound_enabled: bool,
    volume: f32,
}

impl AudioState {
    pub fn new() -> Self {
        let (sender, receiver) = bounded(64);

        // Start the audio thread
        thread::spawn(move || {
            if let Err(e) = run_audio_thread(receiver) {
                eprintln!("Audio thread error: {e}");
            }
        });

        Self {
            sender: Some(sender),
            music_enabled: true,
            sound_enabled: true,
            volume: 0.5, // Default volume of 50%
        }
    }

    /// A handle with no audio thread behind it, for tests.
    pub fn disconnected() -> Self {
        Self {
            sender: None,
            music_enabled: true,
            sound_enabled: true,
            volume: 0.5,
        }
    }

    pub fn is_audio_available(&self) -> bool {
        self.sender.is_some()
    }

    pub fn play_sound(&self, effect: SoundEffect) -> bool {
        if self.sound_enabled {
            if let Some(sender) = &self.sender {
                let _ = sender.try_send(AudioCommand::PlaySound(effect));
            }
            true
        } else {
            false
        }
    }

    /// Silences the music without touching the user's preference.
    pub fn stop_music(&self) {
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(AudioCommand::PlayMusic(false));
        }
    }

    /// Starts the music again, unless the user has it switched off.
    pub fn resume_music(&self) {
        if self.music_enabled {
            if let Some(sender) = &self.sender {
                let _ = sender.try_send(AudioCommand::PlayMusic(true));
            }
        }
    }

    pub fn is_music_enabled(&self) -> bool {
        self.music_enabled
    }

    pub fn is_sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
    }

    pub fn toggle_music(&mut self) {
        self.music_enabled = !self.music_enabled;

        // Send music toggle to audio thread
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(AudioCommand::PlayMusic(self.music_enabled));
        }
    }

    pub fn get_volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        // Clamp volume between 0.0 and 1.0
        self.volume = volume.clamp(0.0, 1.0);

        // Send volume change to audio thread
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(AudioCommand::SetVolume(self.volume));
        }
    }
}

impl Default for AudioState {
    fn default() -> Self {
        Self::new()
    }
}

fn run_audio_thread(receiver: Receiver<AudioCommand>) -> Result<()> {
    // Get the default audio device
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("No audio output device found"))?;
    let config = device.default_output_config()?;

    let mut volume = 0.5f32;
    let mut music_enabled = true;

    // Channels feeding the audio callback
    let (sound_sender, sound_receiver) = bounded::<SoundEffect>(64);
    let (cmd_sender, cmd_receiver) = bounded::<(bool, f32)>(16); // music state and volume

    // Set up audio stream based on the device's sample format
    let _stream = match config.sample_format() {
        cpal::SampleFormat::F32 => {
            run_audio_stream::<f32>(&device, &config.into(), sound_receiver, cmd_receiver)?
        }
        cpal::SampleFormat::I16 => {
            run_audio_stream::<i16>(&device, &config.into(), sound_receiver, cmd_receiver)?
        }
        cpal::SampleFormat::U16 => {
            run_audio_stream::<u16>(&device, &config.into(), sound_receiver, cmd_receiver)?
        }
        _ => return Err(anyhow::anyhow!("Unsupported audio format")),
    };

    // Keep the thread alive and process commands
    loop {
        match receiver.recv() {
            Ok(command) => match command {
                AudioCommand::PlaySound(effect) => {
                    // Forward sound to the audio stream
                    let _ = sound_sender.try_send(effect);
                }
                AudioCommand::PlayMusic(enabled) => {
                    music_enabled = enabled;
                    let _ = cmd_sender.try_send((enabled, volume));
                }
                AudioCommand::SetVolume(new_volume) => {
                    volume = new_volume;
                    let _ = cmd_sender.try_send((music_enabled, volume));
                }
            },
            Err(_) => break, // Channel closed
        }
    }

    Ok(())
}

fn run_audio_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    sound_receiver: Receiver<SoundEffect>,
    cmd_receiver: Receiver<(bool, f32)>,
) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let sample_rate = config.sample_rate.0 as f64;
    let channels = config.channels as usize;

    let mut music_enabled = true;
    let mut volume = 0.5f32;

    // Background music graph, ticked only while enabled
    let mut music = create_background_music();
    music.set_sample_rate(sample_rate);

    // Active sound effects as (effect, start time) pairs
    let mut active_sounds: Vec<(SoundEffect, f64)> = Vec::new();
    let mut current_time = 0.0f64;

    let mut next_value = move || {
        // Process any audio commands (music toggle, volume)
        while let Ok((new_music_enabled, new_volume)) = cmd_receiver.try_recv() {
            music_enabled = new_music_enabled;
            volume = new_volume;
        }

        // Process any new sound effects
        while let Ok(effect) = sound_receiver.try_recv() {
            active_sounds.push((effect, current_time));
        }

        let mut left = 0.0;
        let mut right = 0.0;

        // Add contribution from active sounds, dropping finished ones
        active_sounds.retain(|(_, start_time)| current_time - start_time <= MAX_EFFECT_DURATION);
        for (effect, start_time) in &active_sounds {
            let t = current_time - *start_time;
            let sample = generate_sound_sample(*effect, t);
            left += sample.0;
            right += sample.1;
        }

        // Background music from the fundsp graph
        if music_enabled {
            let (ml, mr) = music.get_stereo();
            left += ml;
            right += mr;
        }

        current_time += 1.0 / sample_rate;

        // Volume, then a hard limiter against clipping
        left = (left * volume).clamp(-1.0, 1.0);
        right = (right * volume).clamp(-1.0, 1.0);

        (left, right)
    };

    let err_fn = |err| eprintln!("Error in audio stream: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let sample = next_value();
                let left = T::from_sample(sample.0);
                let right = T::from_sample(sample.1);

                for (channel, sample) in frame.iter_mut().enumerate() {
                    if channel & 1 == 0 {
                        *sample = left;
                    } else {
                        *sample = right;
                    }
                }
            }
        },
        err_fn,
        None,
    )?;

    stream.play()?;

    Ok(stream)
}

// Longest cue; samples past this are silence for every effect
pub const MAX_EFFECT_DURATION: f64 = 2.0;

// Generate a sound sample for a given effect and time
pub fn generate_sound_sample(effect: SoundEffect, t: f64) -> (f32, f32) {
    let t = t as f32;

    if t > MAX_EFFECT_DURATION as f32 {
        return (0.0, 0.0);
    }

    match effect {
        SoundEffect::Swipe => {
            // Short airy click
            let amp = if t < 0.05 { 0.25 } else { 0.0 };
            let sample = (t * 330.0 * std::f32::consts::TAU).sin() * amp;
            (sample, sample) // Center panned
        }
        SoundEffect::CorrectMatch => {
            // Two-note rising chime
            let (freq, amp) = if t < 0.12 {
                (523.25, 0.35)
            } else if t < 0.3 {
                (659.25, (0.3 - t) * 2.0)
            } else {
                (0.0, 0.0)
            };
            let sample = (t * freq * std::f32::consts::TAU).sin() * amp;
            (sample * 0.9, sample * 1.1) // Slightly right panned
        }
        SoundEffect::WrongMatch => {
            // Low descending buzz with a noise edge
            let freq = 180.0 - 60.0 * t;
            let amp = (0.4 - t).max(0.0);
            let noise = (fastrand::f32() - 0.5) * 0.15;
            let tone = (t * freq * std::f32::consts::TAU).sin() * 0.4;
            let sample = (tone + noise) * amp;
            (sample * 1.1, sample * 0.9) // Slightly left panned
        }
        SoundEffect::ColorUnlock => {
            // Four-note ascending arpeggio
            let (freq, amp) = if t < 0.2 {
                (392.0, 0.35)
            } else if t < 0.4 {
                (493.88, 0.35)
            } else if t < 0.6 {
                (587.33, 0.35)
            } else if t < 0.9 {
                (783.99, 0.35)
            } else {
                (0.0, 0.0)
            };
            let sample = (t * freq * std::f32::consts::TAU).sin() * amp;
            (sample, sample) // Center panned
        }
        SoundEffect::GameOver => {
            // Long descending sweep
            let freq = 600.0 - 300.0 * t;
            let amp = (1.5 - t).max(0.0) * 0.3;
            let sample = (t * freq * std::f32::consts::TAU).sin() * amp;
            (sample, sample) // Center panned
        }
    }
}

// Create background music
fn create_background_music() -> Box<dyn AudioUnit> {
    // Bass line - low frequency oscillator
    let bass = sine_hz(98.0) * 0.06;

    // Melody - pentatonic notes cycling over time
    let melody = lfo(move |t| {
        let notes = [196.0, 246.94, 293.66, 329.63, 392.0];
        let idx = ((t * 0.75) % 5.0) as usize;
        notes[idx]
    }) >> sine() * 0.08;

    // Chord pad for harmony
    let chord = sine_hz(196.0) * 0.03 + sine_hz(293.66) * 0.02 + sine_hz(392.0) * 0.02;

    // Combine all elements and apply volume
    let music = (bass + melody + chord) * 0.6;

    // Convert to stereo with center panning
    Box::new(music >> pan(0.0))
}

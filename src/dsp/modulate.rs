//! Modulation and dry/wet helpers shared by the effects.

/*
Modulation Depth and Mixing
===========================

Every effect in this crate reduces to two small formulas.

Offsetting a base value by a modulator:

    modulated = base + modulator × depth

  The plucked string adds the host's LFO value to its damping this way
  (depth 1) and then clamps the sum back into the stable range.

Crossfading dry and wet signals:

    out = (1 - mix) × dry + mix × wet

  mix = 0.0  only the input
  mix = 0.5  equal parts
  mix = 1.0  only the processed signal

Amplitude modulation (tremolo, autopan) is the crossfade with
`wet = gain × dry`, where `gain` is a unipolar LFO value:

    out = (1 - mix) × x + mix × gain × x

At mix 1 the signal pumps all the way down to silence at the LFO's trough;
at mix 0.5 it dips to half volume.
*/

/// Calculate the modulated parameter value: base + (modulator × depth).
#[inline]
pub fn apply_modulation(base_value: f32, modulator: f32, depth: f32) -> f32 {
    base_value + (modulator * depth)
}

/// Linear dry/wet crossfade. `mix` is clamped to [0, 1].
#[inline]
pub fn crossfade(dry: f32, wet: f32, mix: f32) -> f32 {
    let mix = mix.clamp(0.0, 1.0);
    (1.0 - mix) * dry + mix * wet
}

/// Amplitude modulation of `sample` by a unipolar `gain`, blended by `mix`.
#[inline]
pub fn amplitude_modulate(sample: f32, gain: f32, mix: f32) -> f32 {
    crossfade(sample, gain * sample, mix)
}

//! Domain-critical regression tests for cvd-engine.
//!
//! Fixed expected outputs were computed from the published constants with
//! gamma 2.2 in double precision. None of them sit on a rounding boundary.

#[cfg(test)]
mod domain_tests {
    use crate::api::{CvdError, CvdSimulator, ErrorKind, GammaMode, Intensity, SimulationOptions};
    use crate::buffer::PixelBuffer;
    use crate::color::{Lms, LinearRgb, Srgb};
    use crate::deficiency::Deficiency;
    use crate::engine::{simulate_rgba, transform, transform_with};

    fn run(rgba: [u8; 4], deficiency: Deficiency) -> [u8; 4] {
        simulate_rgba(rgba, &SimulationOptions::new(deficiency)).unwrap()
    }

    // ========================================================================
    // Pinned outputs
    // ========================================================================

    /// If this breaks, it means: the matrices, the coefficients, or the
    /// order of the pipeline stages changed.
    #[test]
    fn test_pure_red_protanopia() {
        assert_eq!(run([255, 0, 0, 255], Deficiency::Protanopia), [100, 73, 35, 255]);
    }

    /// If this breaks, it means: the cone transform is running on linear
    /// light in Encoded mode (or on bytes in Linearized mode).
    #[test]
    fn test_pure_red_protanopia_encoded() {
        let options = SimulationOptions::new(Deficiency::Protanopia).gamma(GammaMode::Encoded);
        assert_eq!(simulate_rgba([255, 0, 0, 255], &options).unwrap(), [32, 16, 3, 255]);

        let grey = simulate_rgba([128, 128, 128, 255], &options).unwrap();
        assert_eq!(grey, [0, 171, 137, 255]);
    }

    #[test]
    fn test_primaries_and_skin_tone() {
        let cases: [([u8; 4], Deficiency, [u8; 4]); 8] = [
            ([255, 0, 0, 255], Deficiency::Deuteranopia, [224, 115, 0, 255]),
            ([255, 0, 0, 255], Deficiency::Tritanopia, [255, 3, 0, 255]),
            ([0, 255, 0, 255], Deficiency::Protanopia, [255, 227, 0, 255]),
            ([0, 255, 0, 255], Deficiency::Deuteranopia, [239, 165, 72, 255]),
            ([0, 0, 255, 255], Deficiency::Tritanopia, [46, 0, 0, 255]),
            ([200, 120, 40, 255], Deficiency::Protanopia, [193, 121, 41, 255]),
            ([200, 120, 40, 255], Deficiency::Deuteranopia, [198, 122, 39, 255]),
            ([200, 120, 40, 255], Deficiency::Tritanopia, [200, 120, 33, 255]),
        ];
        for (input, deficiency, expected) in cases {
            assert_eq!(
                run(input, deficiency),
                expected,
                "{input:?} under {deficiency}"
            );
        }
    }

    // ========================================================================
    // Neutrals
    // ========================================================================

    /// The published substitution rows are not neutral-preserving: grey and
    /// white shift hue. If this starts passing through grey unchanged, the
    /// coefficients were "fixed" and no longer match the reference model.
    #[test]
    fn test_neutrals_are_not_preserved() {
        let grey = [128, 128, 128, 255];
        assert_eq!(run(grey, Deficiency::Protanopia), [0, 146, 132, 255]);
        assert_eq!(run(grey, Deficiency::Deuteranopia), [0, 172, 122, 255]);
        assert_eq!(run(grey, Deficiency::Tritanopia), [129, 128, 77, 255]);

        let white = [255, 255, 255, 255];
        assert_eq!(run(white, Deficiency::Protanopia), [0, 255, 255, 255]);
        assert_eq!(run(white, Deficiency::Deuteranopia), [0, 255, 244, 255]);
        assert_eq!(run(white, Deficiency::Tritanopia), [255, 255, 153, 255]);
    }

    #[test]
    fn test_black_stays_black() {
        for deficiency in Deficiency::ALL {
            for gamma in [GammaMode::Linearized, GammaMode::Encoded] {
                let options = SimulationOptions::new(deficiency).gamma(gamma);
                assert_eq!(
                    simulate_rgba([0, 0, 0, 255], &options).unwrap(),
                    [0, 0, 0, 255]
                );
            }
        }
    }

    // ========================================================================
    // Intensity
    // ========================================================================

    /// If this breaks, it means: intensity 0 no longer short-circuits to the
    /// input, or blending leaks simulated color at weight 0.
    #[test]
    fn test_intensity_zero_is_identity() {
        let data: Vec<u8> = (0..16 * 9 * 4).map(|i| (i * 73 % 256) as u8).collect();
        let input = PixelBuffer::new(16, 9, data).unwrap();
        for deficiency in Deficiency::ALL {
            let out = transform(&input, deficiency, Intensity::NONE).unwrap();
            assert_eq!(out, input);
        }
        assert_eq!(
            simulate_rgba(
                [128, 128, 128, 255],
                &SimulationOptions::new(Deficiency::Protanopia).intensity(Intensity::NONE)
            )
            .unwrap(),
            [128, 128, 128, 255]
        );
    }

    #[test]
    fn test_partial_intensity() {
        let half = SimulationOptions::new(Deficiency::Protanopia).intensity(Intensity::new(0.5).unwrap());
        assert_eq!(simulate_rgba([255, 0, 0, 255], &half).unwrap(), [177, 37, 18, 255]);

        let quarter =
            SimulationOptions::new(Deficiency::Deuteranopia).intensity(Intensity::new(0.25).unwrap());
        assert_eq!(simulate_rgba([200, 120, 40, 255], &quarter).unwrap(), [200, 121, 40, 255]);
    }

    /// Intensity is a straight line between original and simulated color,
    /// so intermediate steps must land between the endpoints.
    #[test]
    fn test_intensity_is_monotonic_per_channel() {
        let input = [255, 0, 0, 255];
        let full = run(input, Deficiency::Protanopia);
        let mut previous = input;
        for percent in (0..=100).step_by(10) {
            let options = SimulationOptions::new(Deficiency::Protanopia)
                .intensity(Intensity::from_percent(percent).unwrap());
            let out = simulate_rgba(input, &options).unwrap();
            for c in 0..3 {
                let (lo, hi) = if input[c] <= full[c] {
                    (input[c], full[c])
                } else {
                    (full[c], input[c])
                };
                assert!(out[c] >= lo && out[c] <= hi, "{percent}%: {out:?}");
                if input[c] <= full[c] {
                    assert!(out[c] >= previous[c]);
                } else {
                    assert!(out[c] <= previous[c]);
                }
            }
            previous = out;
        }
        assert_eq!(previous, full);
    }

    /// Out-of-range intensity must be rejected up front, not clamped
    /// silently.
    #[test]
    fn test_out_of_range_intensity() {
        for value in [-0.5, 1.5] {
            let err = Intensity::new(value).unwrap_err();
            assert_eq!(err, CvdError::IntensityOutOfRange(value));
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert_eq!(Intensity::saturating(-0.5), Intensity::NONE);
        assert_eq!(Intensity::saturating(1.5), Intensity::FULL);
    }

    // ========================================================================
    // Buffer handling
    // ========================================================================

    #[test]
    fn test_alpha_is_preserved() {
        let pixels: Vec<[u8; 4]> = (0..=255u8).map(|a| [200, 120, 40, a]).collect();
        let input = PixelBuffer::from_pixels(16, 16, &pixels).unwrap();
        for deficiency in Deficiency::ALL {
            let out = transform(&input, deficiency, Intensity::FULL).unwrap();
            for (before, after) in input.pixels().zip(out.pixels()) {
                assert_eq!(before[3], after[3]);
            }
        }
    }

    #[test]
    fn test_dimensions_are_preserved() {
        for (w, h) in [(1, 1), (1, 7), (7, 1), (13, 5)] {
            let input = PixelBuffer::filled(w, h, [10, 200, 90, 255]).unwrap();
            let out = transform(&input, Deficiency::Deuteranopia, Intensity::FULL).unwrap();
            assert_eq!((out.width(), out.height()), (w, h));
            assert_eq!(out.as_bytes().len(), input.as_bytes().len());
        }
    }

    /// Saturated inputs drive channels far outside 0..255 before the final
    /// step. If this breaks, values are wrapping instead of clamping.
    #[test]
    fn test_out_of_gamut_channels_clamp() {
        // Pure blue under protanopia reaches about -608 on red
        assert_eq!(run([0, 0, 255, 255], Deficiency::Protanopia), [0, 186, 255, 255]);
        // Pure green under protanopia reaches about 425 on red
        assert_eq!(run([0, 255, 0, 255], Deficiency::Protanopia)[0], 255);
    }

    #[test]
    fn test_pixels_are_independent() {
        let pixels = [
            [255, 0, 0, 255],
            [0, 255, 0, 255],
            [0, 0, 255, 255],
            [200, 120, 40, 255],
            [128, 128, 128, 255],
            [0, 0, 0, 0],
        ];
        let input = PixelBuffer::from_pixels(3, 2, &pixels).unwrap();
        let options = SimulationOptions::new(Deficiency::Tritanopia);
        let out = transform_with(&input, &options).unwrap();
        for (pixel, result) in pixels.iter().zip(out.pixels()) {
            assert_eq!(simulate_rgba(*pixel, &options).unwrap(), result);
        }
    }

    /// Row-parallel and single-pixel paths must produce identical bytes on
    /// a non-square image larger than one rayon chunk.
    #[test]
    fn test_buffer_path_matches_pixel_path() {
        let (w, h) = (97u32, 61u32);
        let data: Vec<u8> = (0..w * h * 4).map(|i| (i.wrapping_mul(2654435761) >> 24) as u8).collect();
        let input = PixelBuffer::new(w, h, data).unwrap();
        let simulator = CvdSimulator::new(Deficiency::Deuteranopia).intensity(Intensity::new(0.7).unwrap());
        let out = simulator.simulate(&input).unwrap();
        for (pixel, result) in input.pixels().zip(out.pixels()) {
            assert_eq!(simulator.simulate_pixel(pixel).unwrap(), result);
        }
    }

    // ========================================================================
    // Type-level pipeline
    // ========================================================================

    /// The typed conversions and the tuple functions must be the same
    /// pipeline.
    #[test]
    fn test_typed_pipeline_matches_engine() {
        let srgb = Srgb::new(200, 120, 40);
        let lms = Deficiency::Protanopia.simulate(Lms::from(LinearRgb::from(srgb)));
        let [r, g, b] = LinearRgb::from(lms).to_encoded();
        let typed = [r.round() as u8, g.round() as u8, b.round() as u8, 255];
        assert_eq!(typed, run([200, 120, 40, 255], Deficiency::Protanopia));
    }
}

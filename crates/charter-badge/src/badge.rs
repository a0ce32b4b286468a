//! Two-segment SVG badge rendering.

/// Width of the fixed left "vote" label segment.
const LABEL_WIDTH: u32 = 40;

/// Inline stylesheet shared by every badge.
const BADGE_STYLE: &str = r#"text {
          font-size: 11px;
          font-family: Verdana,DejaVu Sans,Geneva,sans-serif;
        }
        text.shadow {
          fill: #010101;
          fill-opacity: .3;
        }
        text.vote {
            fill: #ffffff;
        }
        text.status {
            fill: #333;
        }"#;

/// An immutable badge rendering request.
///
/// The badge splits into a fixed-width label segment on the left and a
/// status segment filling the remainder. The status segment draws a
/// neutral background and a progress bar covering `progress` of its
/// width. `progress` is clamped at 0 below but deliberately not above 1:
/// over-quorum votes overflow the bar off the right edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    /// Total width in pixels
    pub width: u32,
    /// Total height in pixels
    pub height: u32,
    /// Progress bar fill color (hex string)
    pub color: String,
    /// Short status label drawn in the right segment
    pub status: String,
    /// Fraction of the status segment covered by the progress bar
    pub progress: f64,
}

impl Badge {
    /// Create a badge rendering request.
    pub fn new(
        width: u32,
        height: u32,
        color: impl Into<String>,
        status: impl Into<String>,
        progress: f64,
    ) -> Self {
        Self {
            width,
            height,
            color: color.into(),
            status: status.into(),
            progress,
        }
    }

    /// Render this badge as a standalone SVG document.
    ///
    /// Pure: no side effects, no filesystem access, byte-identical output
    /// for identical inputs.
    pub fn render(&self) -> String {
        let vote_text_x = f64::from(LABEL_WIDTH) / 2.0;
        let status_width = self.width.saturating_sub(LABEL_WIDTH);
        let status_text_x = LABEL_WIDTH + 4;
        let progress_bar_width = f64::from(status_width) * self.progress.max(0.0);

        format!(
            r##"<svg version="1.1" xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">
  <defs>
    <style><![CDATA[
      {style}
    ]]></style>
    <linearGradient id="smooth" x2="0" y2="100%">
      <stop offset="0" stop-color="#aaa" stop-opacity=".1"/>
      <stop offset="1" stop-opacity=".1"/>
    </linearGradient>
    <mask id="round">
      <rect width="100%" height="100%" rx="3" fill="#fff"/>
    </mask>
  </defs>
  <g id="bg" mask="url(#round)">
    <rect x="0" width="{label_width}" height="{height}" fill="#555"/>
    <rect x="{label_width}" width="{status_width}" height="{height}" fill="#ddd"/>
    <rect x="{label_width}" width="{progress_bar_width}" height="{height}" fill="{color}"/>
    <rect width="{width}" height="{height}" fill="url(#smooth)"/>
  </g>
  <g id="fg">
    <text class="shadow vote" x="{shadow_text_x}" y="15" text-anchor="middle">vote</text>
    <text class="high vote" x="{vote_text_x}" y="14" text-anchor="middle">vote</text>
    <text class="shadow status" x="{status_text_x}" y="15" text-anchor="start">{status}</text>
    <text class="high status" x="{status_text_x}" y="14" text-anchor="start">{status}</text>
  </g>
</svg>
"##,
            width = self.width,
            height = self.height,
            style = BADGE_STYLE,
            label_width = LABEL_WIDTH,
            status_width = status_width,
            progress_bar_width = progress_bar_width,
            color = self.color,
            shadow_text_x = vote_text_x + 0.5,
            vote_text_x = vote_text_x,
            status_text_x = status_text_x,
            status = self.status,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Badge {
        Badge::new(120, 20, "#CCFFE0", "quorum", 1.0)
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(sample().render(), sample().render());
    }

    #[test]
    fn label_segment_has_fixed_width() {
        let svg = sample().render();

        assert!(svg.contains(r##"<rect x="0" width="40" height="20" fill="#555"/>"##));
        assert!(svg.contains(r##"<rect x="40" width="80" height="20" fill="#ddd"/>"##));
    }

    #[test]
    fn progress_scales_the_bar() {
        let svg = Badge::new(120, 20, "#FFFACD", "in progress", 0.5).render();

        assert!(svg.contains(r##"<rect x="40" width="40" height="20" fill="#FFFACD"/>"##));
    }

    #[test]
    fn full_progress_covers_the_status_segment() {
        let svg = sample().render();

        assert!(svg.contains(r##"<rect x="40" width="80" height="20" fill="#CCFFE0"/>"##));
    }

    #[test]
    fn negative_progress_is_clamped_to_zero() {
        let svg = Badge::new(120, 20, "#FFFACD", "in progress", -0.4).render();

        assert!(svg.contains(r##"<rect x="40" width="0" height="20" fill="#FFFACD"/>"##));
    }

    #[test]
    fn over_quorum_progress_overflows_the_right_edge() {
        // No upper clamp: the bar runs past the badge width.
        let svg = Badge::new(120, 20, "#FFFACD", "in progress", 1.25).render();

        assert!(svg.contains(r##"<rect x="40" width="100" height="20" fill="#FFFACD"/>"##));
    }

    #[test]
    fn status_text_is_drawn_with_shadow() {
        let svg = Badge::new(120, 20, "#F4F4F4", "unknown", 1.0).render();

        assert_eq!(svg.matches(">unknown</text>").count(), 2);
        assert!(svg.contains(r#"<text class="shadow status" x="44" y="15""#));
        assert!(svg.contains(r#"<text class="high status" x="44" y="14""#));
    }

    #[test]
    fn decorative_structure_is_present() {
        let svg = sample().render();

        assert!(svg.contains(r#"<mask id="round">"#));
        assert!(svg.contains(r#"<linearGradient id="smooth""#));
        assert!(svg.contains("<![CDATA["));
    }
}

use tempered_bars::Bar;

const LEVELS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One text line with a glyph per bar, followed by the frame energy.
pub fn meter_line(bars: &[Bar], energy: f32) -> String {
    let mut line: String = bars.iter().map(|b| level_char(b.value)).collect();
    line.push_str(&format!(" │ {:5.1}%", energy.clamp(0.0, 1.0) * 100.0));
    line
}

fn level_char(v: f32) -> char {
    let v = v.clamp(0.0, 1.0);
    let i = (v * (LEVELS.len() - 1) as f32).round() as usize;
    LEVELS[i.min(LEVELS.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(value: f32) -> Bar {
        Bar {
            ini_bin: 0,
            end_bin: 1,
            factor: 1.0,
            value,
        }
    }

    #[test]
    fn glyph_per_bar() {
        let bars = [bar(0.0), bar(0.5), bar(1.0)];
        assert_eq!(meter_line(&bars, 0.5), " ▄█ │  50.0%");
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(level_char(-1.0), ' ');
        assert_eq!(level_char(7.0), '█');
    }
}

use plotters::prelude::*;

use crate::errors::{CustomResult, Error};

/// side length of the square canvas in pixels
const SIZE: u32 = 1024;
const MARGIN: u32 = 16;

/// # render a circuit outline as png
/// the outline is closed back to the first point, both axes share one scale and are not drawn.
///
/// ## Arguments
/// * `coordinates` - x/y samples along one lap
///
/// ## Returns
/// * `Vec<u8>` - the encoded png
pub fn render_track_map(coordinates: &[(f64, f64)]) -> CustomResult<Vec<u8>> {
    let (x_range, y_range) = match equal_aspect_ranges(coordinates) {
        Some(ranges) => ranges,
        None => return Err(Error::not_found("track coordinates")),
    };

    let mut buffer = vec![0; (SIZE * SIZE * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (SIZE, SIZE)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(MARGIN)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_error)?;

        let outline = coordinates.iter().chain(coordinates.first()).copied();
        chart
            .draw_series(LineSeries::new(outline, BLACK.stroke_width(3)))
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
    }

    let mut output = vec![];
    let mut encoder = png::Encoder::new(&mut output, SIZE, SIZE);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    encoder
        .write_header()
        .map_err(render_error)?
        .write_image_data(&buffer)
        .map_err(render_error)?;

    Ok(output)
}

/// # axis ranges with the same length, centred on the coordinates
/// `None` for an empty outline or one with non finite values.
fn equal_aspect_ranges(coordinates: &[(f64, f64)]) -> Option<(std::ops::Range<f64>, std::ops::Range<f64>)> {
    if coordinates.is_empty() || coordinates.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return None;
    }

    let (mut min_x, mut max_x) = (f64::MAX, f64::MIN);
    let (mut min_y, mut max_y) = (f64::MAX, f64::MIN);
    for (x, y) in coordinates {
        min_x = min_x.min(*x);
        max_x = max_x.max(*x);
        min_y = min_y.min(*y);
        max_y = max_y.max(*y);
    }

    let half = ((max_x - min_x).max(max_y - min_y) / 2.0).max(1.0);
    let (centre_x, centre_y) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

    Some((centre_x - half..centre_x + half, centre_y - half..centre_y + half))
}

fn render_error(error: impl std::fmt::Display) -> Error {
    Error::RenderError {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_png() {
        let square = vec![(0.0, 0.0), (100.0, 0.0), (100.0, 50.0), (0.0, 50.0)];

        let image = render_track_map(&square).unwrap();

        assert_eq!(&image[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn ranges_share_one_scale() {
        let (x, y) = equal_aspect_ranges(&[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0)]).unwrap();

        assert_eq!(x, 0.0..100.0);
        assert_eq!(y, -25.0..75.0);
    }

    #[test]
    fn empty_outlines_are_not_found() {
        assert!(matches!(render_track_map(&[]), Err(Error::NotFoundError { .. })));
        assert!(equal_aspect_ranges(&[(f64::NAN, 1.0)]).is_none());
    }
}

use crate::bar_detect::detect_error_kind::BarDetectError;
use crate::bar_detect::entropy::EntropyField;

/// Reduce an entropy field to one scalar per interior column.
///
/// Each column of the field is summed down all rows, then `side_cutoff`
/// columns are dropped from each end of the result, because entropy values
/// within the neighbourhood radius of the frame border are unreliable. The
/// returned profile has length `width - 2 * side_cutoff` and its index 0
/// corresponds to original column `side_cutoff`.
pub fn column_profile(field: &EntropyField, side_cutoff: u32) -> Result<Vec<f64>, BarDetectError> {
    let width = field.width();
    let cutoff = side_cutoff as usize;

    if width <= 2 * cutoff {
        return Err(BarDetectError::FrameTooNarrow {
            width: width as u32,
            height: field.height() as u32,
            side_cutoff,
        });
    }

    let sums = field.column_sums();
    Ok(sums[cutoff..width - cutoff].to_vec())
}

#[cfg(test)]
mod test {
    use super::*;
    use image::GrayImage;

    #[test]
    fn test_profile_length() {
        for (width, cutoff) in [(41u32, 20u32), (100, 20), (9, 2), (7, 0)] {
            let img = GrayImage::new(width, 5);
            let field = EntropyField::from_frame(&img, 1);

            let act = column_profile(&field, cutoff).unwrap().len();
            let exp = (width - 2 * cutoff) as usize;
            assert_eq!(exp, act);
        }
    }

    #[test]
    fn test_too_narrow_is_rejected() {
        //width of exactly 2 * side_cutoff would leave an empty profile
        let img = GrayImage::new(40, 5);
        let field = EntropyField::from_frame(&img, 1);

        let act = column_profile(&field, 20);
        assert!(matches!(
            act,
            Err(BarDetectError::FrameTooNarrow { width: 40, height: 5, side_cutoff: 20 })
        ));
    }

    #[test]
    fn test_trim_keeps_interior_columns() {
        //columns with distinct content so the trim offset is observable
        let img = GrayImage::from_fn(10, 3, |x, y| image::Luma([if x >= 4 && y == 1 { 255 } else { 0 }]));
        let field = EntropyField::from_frame(&img, 1);

        let full = field.column_sums();
        let trimmed = column_profile(&field, 2).unwrap();

        assert_eq!(trimmed.as_slice(), &full[2..8]);
    }
}

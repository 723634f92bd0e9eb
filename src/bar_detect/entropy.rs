use image::{GrayImage, Luma};
use ndarray::{Array2, Axis};

/// The local-entropy transform of a grayscale frame.
///
/// Each cell holds the Shannon entropy (in bits) of the intensity histogram
/// inside a disk of the configured radius centred on that pixel. High values
/// mean texture/detail, values near zero mean a flat region such as a
/// letterbox bar.
///
/// Cells within the radius of the frame border are computed from whatever
/// neighbours are in bounds. They are statistically unreliable and downstream
/// consumers trim them away rather than trying to correct them here.
pub struct EntropyField {
    field: Array2<f64>,
}

impl EntropyField {
    #[must_use]
    pub fn from_frame(frame: &GrayImage, radius: u32) -> Self {
        let (width, height) = frame.dimensions();
        let offsets = disk_offsets(radius);

        let mut field = Array2::zeros((height as usize, width as usize));

        for y in 0..i64::from(height) {
            for x in 0..i64::from(width) {
                let mut histogram = [0u32; 256];
                let mut total = 0u32;

                for &(dx, dy) in &offsets {
                    let nx = x + dx;
                    let ny = y + dy;
                    if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
                        continue;
                    }

                    let Luma([pix]) = *frame.get_pixel(nx as u32, ny as u32);
                    histogram[pix as usize] += 1;
                    total += 1;
                }

                field[(y as usize, x as usize)] = histogram_entropy(&histogram, total);
            }
        }

        Self { field }
    }

    pub fn width(&self) -> usize {
        self.field.ncols()
    }

    pub fn height(&self) -> usize {
        self.field.nrows()
    }

    /// One aggregated entropy value per column (the sum down all rows).
    #[must_use]
    pub fn column_sums(&self) -> Vec<f64> {
        self.field.sum_axis(Axis(0)).to_vec()
    }
}

//shannon entropy of a histogram, in bits. Empty and single-valued
//distributions both have zero entropy, so degenerate neighbourhoods
//never produce a NaN.
fn histogram_entropy(histogram: &[u32; 256], total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }

    let total = f64::from(total);
    histogram
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = f64::from(count) / total;
            -(p * p.log2())
        })
        .sum()
}

//all (dx, dy) with dx² + dy² <= radius², i.e. a filled disk including its rim
fn disk_offsets(radius: u32) -> Vec<(i64, i64)> {
    let r = i64::from(radius);
    let r2 = r * r;

    let mut ret = vec![];
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r2 {
                ret.push((dx, dy));
            }
        }
    }

    ret
}

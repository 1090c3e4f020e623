/// Balanced class weights: `n_samples / (n_present_classes * count_c)`.
///
/// Classes with no samples get weight `0.0`.
pub fn balanced_class_weights(y: &[usize], n_classes: usize) -> Vec<f64> {
    let counts = class_counts(y, n_classes);

    let present = counts.iter().filter(|&&c| c > 0).count();
    if present == 0 {
        return vec![0.0; n_classes];
    }

    counts
        .iter()
        .map(|&count| {
            if count == 0 {
                0.0
            } else {
                y.len() as f64 / (present as f64 * count as f64)
            }
        })
        .collect()
}

/// Per-sample weights derived from [`balanced_class_weights`].
pub fn balanced_sample_weights(y: &[usize], n_classes: usize) -> Vec<f64> {
    let class_weights = balanced_class_weights(y, n_classes);
    y.iter().map(|&label| class_weights[label]).collect()
}

/// Training row indices in which every present class appears as often as the
/// largest one.
///
/// Rows of a class are cycled in order, so each is repeated `floor` or `ceil` of
/// `max_count / count_c` times. A learner without sample weights sees the same
/// per-class totals as [`balanced_class_weights`], scaled by
/// `resampled_len / n_samples`.
pub fn balanced_resample(y: &[usize], n_classes: usize) -> Vec<usize> {
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
    for (row, &label) in y.iter().enumerate() {
        members[label].push(row);
    }
    let target = members.iter().map(Vec::len).max().unwrap_or(0);

    members
        .iter()
        .filter(|rows| !rows.is_empty())
        .flat_map(|rows| (0..target).map(move |i| rows[i % rows.len()]))
        .collect()
}

fn class_counts(y: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &label in y {
        counts[label] += 1;
    }
    counts
}

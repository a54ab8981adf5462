use std::fmt::Debug;

use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};
use num_traits::{Float, Num};

/// Make sure bounds are ordered correctly, eg the upper bound is not less than the lower bound.
///
pub fn rearrange<N>(lower: N, upper: N) -> (N, N)
where
    N: Num + Debug + PartialOrd,
{
    if lower > upper {
        (upper, lower)
    } else {
        (lower, upper)
    }
}

/// Build a new array by picking positions along `axis` from `data`.
///
/// `mapping[i]` is the source position for target position `i`. Target positions mapped to `None`
/// are filled with NaN.
///
pub(crate) fn take_axis<N>(data: ArrayViewD<N>, axis: Axis, mapping: &[Option<usize>]) -> ArrayD<N>
where
    N: Float,
{
    let mut shape = data.shape().to_vec();
    shape[axis.index()] = mapping.len();

    let mut taken = ArrayD::from_elem(IxDyn(&shape), N::nan());
    for (target, source) in mapping.iter().enumerate() {
        if let Some(source) = source {
            taken
                .index_axis_mut(axis, target)
                .assign(&data.index_axis(axis, *source));
        }
    }

    taken
}

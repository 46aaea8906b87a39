/// Signed variable label. `l > 0` is the mixed strategy variable of strategy `l`, `-l` its slack.
/// Labels `1..=dim1` are strategies of player A, `dim1 + 1..=dim1 + dim2` those of player B.
pub type Label = isize;

/// One of the two tableaux of the Lemke-Howson system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Rows are the slacks of player A and the strategies of player B.
    A,
    /// Rows are the slacks of player B and the strategies of player A.
    B,
}

/// Maps labels of a `dim1 x dim2` game to the tableau and coefficient column holding them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSpace {
    dim1: usize,
    dim2: usize,
}

impl LabelSpace {
    pub fn new(dim1: usize, dim2: usize) -> Self {
        Self { dim1, dim2 }
    }

    /// Number of strategies of both players, which is also the largest label.
    pub fn len(&self) -> usize {
        self.dim1 + self.dim2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, label: Label) -> bool {
        label != 0 && label.unsigned_abs() <= self.len()
    }

    /// Strategy labels `1..=n`.
    pub fn strategies(self) -> impl Iterator<Item = Label> {
        1..=self.len() as Label
    }

    pub fn tableau(&self, label: Label) -> Side {
        let dim1 = self.dim1 as Label;
        if label > dim1 || (label < 0 && label >= -dim1) {
            Side::A
        } else {
            Side::B
        }
    }

    /// Coefficient column of `label` inside its tableau. Column 0 holds the value of the basic
    /// variable, so the result is always in `1..=n`.
    pub fn column(&self, label: Label) -> usize {
        let dim1 = self.dim1 as Label;
        let dim2 = self.dim2 as Label;
        let column = if label > 0 && label <= dim1 {
            dim2 + label
        } else if label > dim1 {
            label
        } else if label < 0 && label >= -dim1 {
            -label
        } else {
            -label - dim1
        };
        column as usize
    }
}

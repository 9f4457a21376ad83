use std::{
    cmp::min,
    ops::{Index, IndexMut},
};

#[derive(Debug, Clone)]
struct Matrix<T: Clone> {
    data: Vec<T>,
    cols: usize,
}

impl<T: Clone> Matrix<T> {
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            data: vec![fill; rows * cols],
            cols,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.data[row * self.cols + col]
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[row * self.cols + col]
    }
}

impl<T: Clone> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    fn index(&self, (row, col): (usize, usize)) -> &T {
        self.get(row, col)
    }
}

impl<T: Clone> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        self.get_mut(row, col)
    }
}

fn min3<T: Ord>(v1: T, v2: T, v3: T) -> T {
    min(v1, min(v2, v3))
}

/// Levenshtein distance over characters, used for fuzzy brand-name matching.
pub fn edit_distance(word1: &str, word2: &str) -> usize {
    let a: Vec<char> = word1.chars().collect();
    let b: Vec<char> = word2.chars().collect();

    let mut cache = Matrix::<usize>::new(a.len() + 1, b.len() + 1, usize::MAX);

    for j in 0..=a.len() {
        cache[(j, b.len())] = a.len() - j;
    }
    for i in 0..=b.len() {
        cache[(a.len(), i)] = b.len() - i;
    }

    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            if a[i] == b[j] {
                cache[(i, j)] = cache[(i + 1, j + 1)];
            } else {
                cache[(i, j)] = 1 + min3(
                    cache[(i + 1, j)],
                    cache[(i, j + 1)],
                    cache[(i + 1, j + 1)],
                );
            }
        }
    }

    cache[(0, 0)]
}

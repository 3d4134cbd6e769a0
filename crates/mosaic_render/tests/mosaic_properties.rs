//! Property-based tests for preparation, corpus filtering and glyph consumption.

use std::cell::Cell;
use std::io;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use mosaic_render::{
    filter_corpus, AnsiRenderer, BoundingBox, ColorSample, GlyphSource, GlyphStream,
    HtmlRenderer, PixelGrid, RasterRenderer, TerminalRenderer, DEFAULT_BOUND,
};
use proptest::prelude::*;

/// Glyph source that counts how often it was asked.
struct Counting<'a>(&'a Cell<usize>);

impl GlyphSource for Counting<'_> {
    fn next_glyph(&mut self) -> char {
        self.0.set(self.0.get() + 1);
        'x'
    }
}

fn sample_strategy() -> impl Strategy<Value = ColorSample> {
    prop_oneof![
        Just(ColorSample::TRANSPARENT),
        (any::<u8>(), any::<u8>(), any::<u8>(), 1u8..=255).prop_map(|(r, g, b, a)| ColorSample::new(r, g, b, a)),
    ]
}

fn grid_strategy() -> impl Strategy<Value = PixelGrid> {
    (1usize..6, 1usize..6)
        .prop_flat_map(|(width, height)| {
            prop::collection::vec(prop::collection::vec(sample_strategy(), width), height)
        })
        .prop_map(|rows| PixelGrid::from_rows(rows).unwrap())
}

proptest! {
    #[test]
    fn prepared_geometry_stays_in_bounds(width in 1u32..2000, height in 1u32..2000) {
        let geometry = BoundingBox::default().derive(width, height).unwrap();
        prop_assert!(geometry.columns.max(geometry.rows) <= DEFAULT_BOUND);
        prop_assert!(geometry.columns <= width && geometry.rows <= height);
        prop_assert!(geometry.columns >= 1 && geometry.rows >= 1);
        if width <= DEFAULT_BOUND && height <= DEFAULT_BOUND {
            prop_assert_eq!((geometry.columns, geometry.rows), (width, height));
        }
    }

    #[test]
    fn fitted_image_matches_geometry(width in 1u32..80, height in 1u32..80) {
        let bounds = BoundingBox::default();
        let fitted = bounds.fit(DynamicImage::new_rgba8(width, height)).unwrap();
        let geometry = bounds.derive(width, height).unwrap();
        prop_assert_eq!(fitted.dimensions(), (geometry.columns, geometry.rows));
    }

    #[test]
    fn filter_keeps_exactly_the_glyph_characters(text in "\\PC*|[\\t\\n\\r a-z\\x00-\\x1f\\x7f-\\xff]*") {
        let filtered = filter_corpus(&text);
        let expected = text
            .chars()
            .filter(|&ch| ch == ' ' || (33..=126).contains(&u32::from(ch)) || u32::from(ch) > 126)
            .count();
        prop_assert_eq!(filtered.len(), expected);
        prop_assert!(filtered.iter().all(|&ch| u32::from(ch) >= 32));
    }

    #[test]
    fn glyph_sequence_is_deterministic(
        corpora in prop::collection::vec("[a-zA-Z0-9 ]{1,12}", 1..4),
        calls in 0usize..200,
    ) {
        let paths: Vec<PathBuf> = (0..corpora.len()).map(|index| PathBuf::from(index.to_string())).collect();
        let run = || {
            let corpora = corpora.clone();
            let loader = move |path: &Path| -> io::Result<Vec<char>> {
                let index: usize = path.to_string_lossy().parse().unwrap();
                Ok(corpora[index].chars().collect())
            };
            GlyphStream::with_loader(paths.clone(), loader).take(calls).collect::<String>()
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn rotation_moves_to_second_corpus(first in "[a-z]{1,10}", second in "[A-Z]{1,10}") {
        let (first_chars, second_chars): (Vec<char>, Vec<char>) = (first.chars().collect(), second.chars().collect());
        let loader = move |path: &Path| -> io::Result<Vec<char>> {
            Ok(if path == Path::new("first") { first_chars.clone() } else { second_chars.clone() })
        };
        let mut stream = GlyphStream::with_loader(vec![PathBuf::from("first"), PathBuf::from("second")], loader);

        let head: String = (&mut stream).take(first.chars().count()).collect();
        prop_assert_eq!(&head, &first);
        prop_assert_eq!(stream.active_corpus(), 1);
        prop_assert_eq!(stream.next_glyph(), second.chars().next().unwrap());
    }

    #[test]
    fn transparent_samples_consume_no_glyphs(grid in grid_strategy()) {
        let expected = grid.opaque_count() * 2;
        let calls = Cell::new(0);

        TerminalRenderer.render(&grid, &mut Counting(&calls), &mut Vec::<u8>::new()).unwrap();
        prop_assert_eq!(calls.replace(0), expected);

        AnsiRenderer::new(ColorSample::opaque(1, 2, 3)).render_to_string(&grid, &mut Counting(&calls)).unwrap();
        prop_assert_eq!(calls.replace(0), expected);

        HtmlRenderer::default().render_to_string(&grid, &mut Counting(&calls)).unwrap();
        prop_assert_eq!(calls.replace(0), expected);

        RasterRenderer::default().render(&grid, &mut Counting(&calls)).unwrap();
        prop_assert_eq!(calls.replace(0), expected);
    }

    #[test]
    fn ansi_rows_match_grid_height(grid in grid_strategy()) {
        let text = AnsiRenderer::default().render_to_string(&grid, &mut GlyphStream::placeholder()).unwrap();
        prop_assert_eq!(text.lines().count(), grid.height as usize);
    }
}

use std::fmt::Display;

/// Number of genre attributes every profile vector carries
pub const GENRE_COUNT: usize = 18;

/// Genre attribute of a movie, in the fixed column order of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Childrens,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Fantasy,
    FilmNoir,
    Horror,
    Musical,
    Mystery,
    Romance,
    SciFi,
    Thriller,
    War,
    Western,
}

impl Genre {
    /// All genres in vector component order
    pub const ALL: [Genre; GENRE_COUNT] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Childrens,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Fantasy,
        Genre::FilmNoir,
        Genre::Horror,
        Genre::Musical,
        Genre::Mystery,
        Genre::Romance,
        Genre::SciFi,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
    ];

    /// Position of this genre inside a profile vector
    pub fn index(self) -> usize {
        self as usize
    }

    /// Dataset label of the genre
    pub fn label(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Childrens => "Children's",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::FilmNoir => "Film-Noir",
            Genre::Horror => "Horror",
            Genre::Musical => "Musical",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Binary genre flags attached to a rated movie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GenreFlags([bool; GENRE_COUNT]);

impl GenreFlags {
    /// Creates flags with exactly the given genres set
    pub fn from_genres(genres: &[Genre]) -> Self {
        let mut flags = Self::default();
        for genre in genres {
            flags.set(*genre, true);
        }
        flags
    }

    pub fn set(&mut self, genre: Genre, value: bool) {
        self.0[genre.index()] = value;
    }

    pub fn contains(&self, genre: Genre) -> bool {
        self.0[genre.index()]
    }

    /// Iterates over the genres that are set, in component order
    pub fn genres(&self) -> impl Iterator<Item = Genre> + '_ {
        Genre::ALL.into_iter().filter(|genre| self.contains(*genre))
    }

    /// Flags as 0/1 components
    pub fn to_vector(&self) -> [f64; GENRE_COUNT] {
        self.0.map(|flag| if flag { 1.0 } else { 0.0 })
    }
}

mod genre;
mod track_list;

pub use genre::{Genre, GenreParseError};
pub use track_list::{RemoveError, TrackId, TrackList};

use clap::CommandFactory;

use super::*;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn submit_defaults_to_happy_with_no_avatar() {
    let cli = Cli::try_parse_from(["testimonials", "submit", "--name", "Ana", "--feedback", "Hi"]).unwrap();
    let Command::Submit(args) = cli.command else {
        panic!("expected submit");
    };
    assert_eq!(args.rating, Rating::Happy);
    assert!(args.avatar.is_none());
    assert!(args.image.is_none());
}

#[test]
fn avatar_and_image_conflict() {
    let result = Cli::try_parse_from([
        "testimonials",
        "submit",
        "--name",
        "Ana",
        "--feedback",
        "Hi",
        "--avatar",
        "avatar2",
        "--image",
        "me.png",
    ]);
    assert!(result.is_err());
}

#[test]
fn parse_rating_and_avatar_reject_unknown_values() {
    assert_eq!(parse_rating("sad"), Ok(Rating::Sad));
    assert!(parse_rating("meh").is_err());
    assert_eq!(parse_avatar("avatar6"), Ok(AvatarIcon::Avatar6));
    assert!(parse_avatar("avatar7").is_err());
}

#[test]
fn mime_for_path_maps_known_image_extensions() {
    assert_eq!(mime_for_path(Path::new("me.PNG")), Some("image/png"));
    assert_eq!(mime_for_path(Path::new("photos/me.jpeg")), Some("image/jpeg"));
    assert_eq!(mime_for_path(Path::new("cv.pdf")), None);
    assert_eq!(mime_for_path(Path::new("noext")), None);
}

#[test]
fn feed_errors_print_user_message() {
    let err = CliError::from(FeedError::from(feed::ValidationError::MissingFields));
    assert_eq!(err.to_string(), "Name and feedback are required");
}

use jiff::civil::Time;

/// Parses a wall-clock time such as `08:30`, `8:30` or `17:45:10`.
pub fn parse_time(input: &str) -> Result<Time, String> {
    if let Ok(time) = input.parse::<Time>() {
        return Ok(time);
    }

    let (hour, minute) = input
        .split_once(':')
        .ok_or_else(|| String::from("Invalid time, expected HH:MM"))?;

    let hour: i8 = hour.parse().map_err(|_| String::from("Invalid hour"))?;
    let minute: i8 = minute.parse().map_err(|_| String::from("Invalid minute"))?;

    Time::new(hour, minute, 0, 0).map_err(|error| error.to_string())
}

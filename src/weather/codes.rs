/// German description of a WMO weather code as reported by Open-Meteo
pub fn describe_weather_code(code: u16) -> &'static str {
    match code {
        0 => "Sonnig",
        1 => "Überwiegend sonnig",
        2 => "Teilweise bewölkt",
        3 => "Bewölkt",
        45 => "Nebelig",
        48 => "Gefrierender Nebel",
        51 => "Leichter Sprühregen",
        53 => "Sprühregen",
        55 => "Dichter Sprühregen",
        61 => "Leichter Regen",
        63 => "Regen",
        65 => "Starker Regen",
        71 => "Leichter Schneefall",
        73 => "Schneefall",
        75 => "Starker Schneefall",
        77 => "Schneekörner",
        80 => "Leichte Regenschauer",
        81 => "Regenschauer",
        82 => "Starke Regenschauer",
        95 => "Gewitter",
        96 => "Gewitter mit Hagel",
        99 => "Starkes Gewitter mit Hagel",
        _ => "Unbekannt",
    }
}

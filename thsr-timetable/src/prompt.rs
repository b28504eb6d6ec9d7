//! Interactive selection of a single search on the terminal.

use std::io::{self, BufRead, Write};

use chrono::NaiveDateTime;

use crate::crawl::CrawlPlan;
use crate::domain::{DepartureTime, StationSets, TravelDate};

/// Asks the user for a station pair, date and time.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for one departure, one arrival, a date and a time.
    ///
    /// Defaults are the first departure station, the last arrival station
    /// and `now`. The arrival is asked again while it equals the departure.
    pub fn interactive_plan(
        &mut self,
        stations: &StationSets,
        now: NaiveDateTime,
    ) -> io::Result<(CrawlPlan, TravelDate, DepartureTime)> {
        let departures = stations.departures();
        let arrivals = stations.arrivals();

        let departure = self.choose_station("departure", departures, departures.first())?;
        let mut arrival = self.choose_station("arrival", arrivals, arrivals.last())?;
        while arrival == departure {
            writeln!(
                self.output,
                "Departure and arrival stations cannot be the same. Please select a different arrival station."
            )?;
            arrival = self.choose_station("arrival", arrivals, None)?;
        }

        let date = self.ask_date(TravelDate::from_date(now.date()))?;
        let time = self.ask_time(DepartureTime::from_time(now.time()))?;

        Ok((CrawlPlan::SinglePair { departure, arrival }, date, time))
    }

    /// List `stations` numbered from 1 and read a choice.
    ///
    /// An empty answer picks `default` when there is one. Anything that
    /// isn't a listed number is asked again.
    pub fn choose_station(
        &mut self,
        role: &str,
        stations: &[String],
        default: Option<&String>,
    ) -> io::Result<String> {
        match default {
            Some(name) => writeln!(self.output, "\nSelect {role} station (default: {name}):")?,
            None => writeln!(self.output, "\nSelect {role} station:")?,
        }
        writeln!(self.output, "\n=== Available Stations ===")?;
        for (i, station) in stations.iter().enumerate() {
            writeln!(self.output, "{}: {station}", i + 1)?;
        }
        writeln!(self.output, "=========================\n")?;

        loop {
            match default {
                Some(name) => write!(
                    self.output,
                    "Enter station number (press Enter for default - {name}): "
                )?,
                None => write!(self.output, "Enter station number: ")?,
            }
            let answer = self.read_answer()?;

            if answer.is_empty()
                && let Some(name) = default
            {
                return Ok(name.clone());
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=stations.len()).contains(&n) => return Ok(stations[n - 1].clone()),
                Ok(_) => writeln!(
                    self.output,
                    "Please enter a number between 1 and {}",
                    stations.len()
                )?,
                Err(_) => writeln!(self.output, "Please enter a valid number")?,
            }
        }
    }

    fn ask_date(&mut self, default: TravelDate) -> io::Result<TravelDate> {
        loop {
            write!(
                self.output,
                "\nEnter departure date (YYYY.MM.DD) (press Enter for today - {default}): "
            )?;
            let answer = self.read_answer()?;
            if answer.is_empty() {
                return Ok(default);
            }
            match TravelDate::parse(&answer) {
                Ok(date) => return Ok(date),
                Err(_) => writeln!(self.output, "Invalid date format. Please use YYYY.MM.DD format.")?,
            }
        }
    }

    fn ask_time(&mut self, default: DepartureTime) -> io::Result<DepartureTime> {
        loop {
            write!(
                self.output,
                "Enter departure time (HH:MM) (press Enter for current time - {default}): "
            )?;
            let answer = self.read_answer()?;
            if answer.is_empty() {
                return Ok(default);
            }
            match DepartureTime::parse(&answer) {
                Ok(time) => return Ok(time),
                Err(_) => writeln!(self.output, "Invalid time format. Please use HH:MM format.")?,
            }
        }
    }

    /// Next input line without its line ending. End of input is an error.
    fn read_answer(&mut self) -> io::Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a choice was made",
            ));
        }
        Ok(line.trim().to_string())
    }
}

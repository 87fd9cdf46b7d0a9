use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::analysis::types::{Clef, NoteDuration, SheetMusic, SheetMusicNote};
use crate::error::AnalysisError;

/// MusicXML `<divisions>` per quarter note.
const DIVISIONS: i32 = 4;

/// Serialize sheet music as a MusicXML 3.1 score-partwise document.
///
/// Notes are packed left to right into measures; a measure closes once its
/// beat capacity is consumed and notes are never split across barlines --
/// precise bar layout remains the renderer's concern. Empty input produces a
/// score with one empty measure.
pub fn sheet_music_to_xml(sheet: &SheetMusic) -> Result<String, AnalysisError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_score(&mut writer, sheet)?;
    String::from_utf8(writer.into_inner()).map_err(|e| AnalysisError::Export(e.to_string()))
}

fn divisions_for(duration: NoteDuration) -> i32 {
    (duration.beats() * DIVISIONS as f64) as i32
}

fn write_score(writer: &mut Writer<Vec<u8>>, sheet: &SheetMusic) -> Result<(), AnalysisError> {
    emit(writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    emit(
        writer,
        Event::DocType(BytesText::from_escaped(
            r#"score-partwise PUBLIC "-//Recordare//DTD MusicXML 3.1 Partwise//EN" "http://www.musicxml.org/dtds/partwise.dtd""#,
        )),
    )?;

    let mut score = BytesStart::new("score-partwise");
    score.push_attribute(("version", "3.1"));
    emit(writer, Event::Start(score))?;

    // part-list with the single transcribed part
    emit(writer, Event::Start(BytesStart::new("part-list")))?;
    let mut score_part = BytesStart::new("score-part");
    score_part.push_attribute(("id", "P1"));
    emit(writer, Event::Start(score_part))?;
    text_element(writer, "part-name", "Transcription")?;
    emit(writer, Event::End(BytesEnd::new("score-part")))?;
    emit(writer, Event::End(BytesEnd::new("part-list")))?;

    let mut part = BytesStart::new("part");
    part.push_attribute(("id", "P1"));
    emit(writer, Event::Start(part))?;

    let beats_per_measure = sheet.time_sig_num as f64 * 4.0 / sheet.time_sig_den as f64;
    let mut measure_number = 0u32;
    let mut beats_used = f64::INFINITY; // forces the first measure open
    for note in &sheet.notes {
        if beats_used >= beats_per_measure {
            if measure_number > 0 {
                emit(writer, Event::End(BytesEnd::new("measure")))?;
            }
            measure_number += 1;
            open_measure(writer, measure_number, measure_number == 1, sheet)?;
            beats_used = 0.0;
        }
        write_note(writer, note)?;
        beats_used += note.duration.beats();
    }

    if measure_number == 0 {
        // No notes: still emit one well-formed measure
        open_measure(writer, 1, true, sheet)?;
    }
    emit(writer, Event::End(BytesEnd::new("measure")))?;

    emit(writer, Event::End(BytesEnd::new("part")))?;
    emit(writer, Event::End(BytesEnd::new("score-partwise")))?;
    Ok(())
}

fn open_measure(
    writer: &mut Writer<Vec<u8>>,
    number: u32,
    with_attributes: bool,
    sheet: &SheetMusic,
) -> Result<(), AnalysisError> {
    let mut measure = BytesStart::new("measure");
    measure.push_attribute(("number", number.to_string().as_str()));
    emit(writer, Event::Start(measure))?;

    if with_attributes {
        emit(writer, Event::Start(BytesStart::new("attributes")))?;
        text_element(writer, "divisions", &DIVISIONS.to_string())?;

        emit(writer, Event::Start(BytesStart::new("key")))?;
        text_element(writer, "fifths", "0")?;
        emit(writer, Event::End(BytesEnd::new("key")))?;

        emit(writer, Event::Start(BytesStart::new("time")))?;
        text_element(writer, "beats", &sheet.time_sig_num.to_string())?;
        text_element(writer, "beat-type", &sheet.time_sig_den.to_string())?;
        emit(writer, Event::End(BytesEnd::new("time")))?;

        let (sign, line) = match sheet.clef {
            Clef::Treble => ("G", "2"),
            Clef::Bass => ("F", "4"),
        };
        emit(writer, Event::Start(BytesStart::new("clef")))?;
        text_element(writer, "sign", sign)?;
        text_element(writer, "line", line)?;
        emit(writer, Event::End(BytesEnd::new("clef")))?;

        emit(writer, Event::End(BytesEnd::new("attributes")))?;
    }
    Ok(())
}

fn write_note(writer: &mut Writer<Vec<u8>>, note: &SheetMusicNote) -> Result<(), AnalysisError> {
    emit(writer, Event::Start(BytesStart::new("note")))?;

    let (step, alter) = note.pitch.step_alter();
    emit(writer, Event::Start(BytesStart::new("pitch")))?;
    text_element(writer, "step", step)?;
    if alter != 0 {
        text_element(writer, "alter", &alter.to_string())?;
    }
    text_element(writer, "octave", &note.octave.to_string())?;
    emit(writer, Event::End(BytesEnd::new("pitch")))?;

    text_element(writer, "duration", &divisions_for(note.duration).to_string())?;
    text_element(writer, "type", note.duration.xml_name())?;

    emit(writer, Event::End(BytesEnd::new("note")))?;
    Ok(())
}

fn text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), AnalysisError> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event) -> Result<(), AnalysisError> {
    writer
        .write_event(event)
        .map_err(|e| AnalysisError::Export(e.to_string()))
}
